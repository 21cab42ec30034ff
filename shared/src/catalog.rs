//! Catalog query types
//!
//! The single source of truth for how the catalog view state turns into a
//! data-store request: filter predicates, ordering clause, row range and the
//! exact-count flag all derive from [`CatalogQuery`]. The displayed page must
//! equal exactly what the store returns for the built request; no client-side
//! filtering or sorting happens afterwards.

use serde::{Deserialize, Serialize};

/// Sort options exposed by the catalog toolbar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Creation time, newest first
    #[default]
    Newest,
    /// Price ascending
    PriceAsc,
    /// Price descending
    PriceDesc,
}

/// Category filter; `All` is the sentinel that omits the predicate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn only(name: impl Into<String>) -> Self {
        Self::Only(name.into())
    }

    /// The category name, or `None` for the "all" sentinel
    pub fn as_option(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(name) => Some(name),
        }
    }
}

/// Catalog view query state
///
/// Invariant: whenever `search_term`, `category` or `sort` changes, `page` is
/// reset to 1 before the next fetch is issued. The controller in
/// `tienda-client` enforces this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub search_term: String,
    pub category: CategoryFilter,
    pub sort: SortOrder,
    /// Page index, 1-based
    pub page: u32,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category: CategoryFilter::All,
            sort: SortOrder::Newest,
            page: 1,
        }
    }
}

impl CatalogQuery {
    /// Build the fully specified store request for this view state
    pub fn to_page_request(&self, page_size: u32) -> PageRequest {
        let page_size = u64::from(page_size.max(1));
        let page = u64::from(self.page.max(1));
        let from = (page - 1) * page_size;
        let to = from + page_size - 1;

        PageRequest {
            category: self.category.as_option().map(str::to_string),
            title_search: (!self.search_term.is_empty()).then(|| self.search_term.clone()),
            order: match self.sort {
                SortOrder::Newest => OrderBy::descending("created_at"),
                SortOrder::PriceAsc => OrderBy::ascending("price"),
                SortOrder::PriceDesc => OrderBy::descending("price"),
            },
            range: RowRange { from, to },
            exact_count: true,
        }
    }
}

/// Fully specified list request against the data store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Equality filter on category, absent for "all"
    pub category: Option<String>,
    /// Case-insensitive substring filter on title, absent when empty
    pub title_search: Option<String>,
    pub order: OrderBy,
    pub range: RowRange,
    /// Ask the store for the exact row count matching the filters,
    /// ignoring the range
    pub exact_count: bool,
}

/// Ordering clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: String,
    pub ascending: bool,
}

impl OrderBy {
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: true,
        }
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: false,
        }
    }
}

/// Zero-based inclusive row range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRange {
    pub from: u64,
    pub to: u64,
}

/// One page of rows plus the exact row count when the store returned one
#[derive(Debug, Clone)]
pub struct StorePage<T> {
    pub rows: Vec<T>,
    /// Total rows matching the filters, ignoring the range
    pub count: Option<u64>,
}

/// Total page count for a row count, never less than 1
///
/// An empty result set still renders as "page 1 of 1".
pub fn total_pages(total_count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    let pages = total_count.div_ceil(u64::from(page_size)).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query() {
        let query = CatalogQuery::default();
        assert_eq!(query.search_term, "");
        assert_eq!(query.category, CategoryFilter::All);
        assert_eq!(query.sort, SortOrder::Newest);
        assert_eq!(query.page, 1);
    }

    #[test]
    fn test_category_filter_with_price_ascending() {
        let query = CatalogQuery {
            category: CategoryFilter::only("Mates"),
            sort: SortOrder::PriceAsc,
            ..CatalogQuery::default()
        };
        let request = query.to_page_request(6);

        assert_eq!(request.category.as_deref(), Some("Mates"));
        assert_eq!(request.title_search, None);
        assert_eq!(request.order, OrderBy::ascending("price"));
        assert_eq!(request.range, RowRange { from: 0, to: 5 });
        assert!(request.exact_count);
    }

    #[test]
    fn test_newest_orders_by_creation_time_descending() {
        let request = CatalogQuery::default().to_page_request(6);
        assert_eq!(request.order, OrderBy::descending("created_at"));
        assert_eq!(request.category, None);
        assert_eq!(request.title_search, None);
    }

    #[test]
    fn test_search_term_becomes_title_filter() {
        let query = CatalogQuery {
            search_term: "termo".to_string(),
            ..CatalogQuery::default()
        };
        let request = query.to_page_request(6);
        assert_eq!(request.title_search.as_deref(), Some("termo"));
    }

    #[test]
    fn test_row_range_for_later_pages() {
        let query = CatalogQuery {
            page: 3,
            ..CatalogQuery::default()
        };
        let request = query.to_page_request(6);
        assert_eq!(request.range, RowRange { from: 12, to: 17 });
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(13, 6), 3);
        assert_eq!(total_pages(12, 6), 2);
        assert_eq!(total_pages(1, 6), 1);
        // 0 rows still renders as one empty page
        assert_eq!(total_pages(0, 6), 1);
        assert_eq!(total_pages(10, 0), 1);
    }

    #[test]
    fn test_sort_order_wire_names() {
        assert_eq!(
            serde_json::to_string(&SortOrder::Newest).unwrap(),
            "\"newest\""
        );
        assert_eq!(
            serde_json::to_string(&SortOrder::PriceAsc).unwrap(),
            "\"price-asc\""
        );
        assert_eq!(
            serde_json::to_string(&SortOrder::PriceDesc).unwrap(),
            "\"price-desc\""
        );
    }
}
