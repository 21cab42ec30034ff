//! Catalog controller integration tests
//!
//! Drive the controller against a scripted in-memory store: no network, no
//! UI harness.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;

use shared::catalog::PageRequest;
use tienda_client::{
    CatalogController, CatalogSettings, CatalogStore, CategoryFilter, ClientError, ClientResult,
    Product, SortOrder, StorePage,
};

fn product(id: i64, title: &str) -> Product {
    Product {
        id,
        title: title.to_string(),
        description: String::new(),
        price: Decimal::from(100 * id),
        category: "Termos".to_string(),
        images: vec![format!("https://cdn.example/{id}.jpg")],
        created_at: chrono::DateTime::from_timestamp(1_700_000_000 + id, 0).unwrap(),
    }
}

fn products(ids: std::ops::Range<i64>) -> Vec<Product> {
    ids.map(|id| product(id, &format!("Producto {id}"))).collect()
}

enum Reply {
    Page {
        rows: Vec<Product>,
        count: Option<u64>,
        delay: Duration,
    },
    Fail {
        message: String,
    },
}

/// Scripted store: replies are popped in call order, requests are recorded.
#[derive(Clone, Default)]
struct MockStore {
    requests: Arc<Mutex<Vec<PageRequest>>>,
    script: Arc<Mutex<VecDeque<Reply>>>,
}

impl MockStore {
    fn push_page(&self, rows: Vec<Product>, count: Option<u64>) {
        self.push_page_after(rows, count, Duration::ZERO);
    }

    fn push_page_after(&self, rows: Vec<Product>, count: Option<u64>, delay: Duration) {
        self.script
            .lock()
            .unwrap()
            .push_back(Reply::Page { rows, count, delay });
    }

    fn push_fail(&self, message: &str) {
        self.script.lock().unwrap().push_back(Reply::Fail {
            message: message.to_string(),
        });
    }

    fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogStore for MockStore {
    async fn fetch_page(&self, request: &PageRequest) -> ClientResult<StorePage<Product>> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self.script.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Page { rows, count, delay }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Ok(StorePage { rows, count })
            }
            Some(Reply::Fail { message }) => Err(ClientError::Internal(message)),
            None => Ok(StorePage {
                rows: Vec::new(),
                count: Some(0),
            }),
        }
    }
}

const QUIET: Duration = Duration::from_millis(25);

fn controller(store: MockStore) -> CatalogController<MockStore> {
    CatalogController::new(
        store,
        CatalogSettings {
            page_size: 6,
            debounce: QUIET,
        },
    )
}

/// Long enough for a debounce timer plus a zero-delay fetch to finish
async fn settle() {
    tokio::time::sleep(Duration::from_millis(120)).await;
}

#[tokio::test]
async fn initial_refresh_loads_first_page() {
    let store = MockStore::default();
    store.push_page(products(1..7), Some(13));
    let catalog = controller(store.clone());

    catalog.refresh().await;

    let snapshot = catalog.snapshot();
    assert_eq!(snapshot.items.len(), 6);
    assert_eq!(snapshot.total_count, 13);
    assert_eq!(snapshot.total_pages, 3);
    assert_eq!(snapshot.page, 1);
    assert!(!snapshot.loading);
    assert!(snapshot.error.is_none());
}

#[tokio::test]
async fn thirteen_rows_paginate_into_three_pages() {
    let store = MockStore::default();
    store.push_page(products(1..7), Some(13));
    let catalog = controller(store.clone());
    catalog.refresh().await;

    // The last page holds the single remaining row
    store.push_page(products(13..14), Some(13));
    assert!(catalog.set_page(3));
    settle().await;

    let snapshot = catalog.snapshot();
    assert_eq!(snapshot.page, 3);
    assert_eq!(snapshot.items.len(), 1);

    let requests = store.requests();
    let last = requests.last().unwrap();
    assert_eq!(last.range.from, 12);
    assert_eq!(last.range.to, 17);
}

#[tokio::test]
async fn out_of_range_pages_are_rejected_not_clamped() {
    let store = MockStore::default();
    store.push_page(products(1..7), Some(13));
    let catalog = controller(store.clone());
    catalog.refresh().await;

    let before = store.requests().len();
    assert!(!catalog.set_page(0));
    assert!(!catalog.set_page(4));
    settle().await;

    // Rejected navigation issues no fetch and moves nothing
    assert_eq!(store.requests().len(), before);
    assert_eq!(catalog.snapshot().page, 1);
}

#[tokio::test]
async fn filter_change_resets_to_first_page() {
    let store = MockStore::default();
    store.push_page(products(1..7), Some(13));
    let catalog = controller(store.clone());
    catalog.refresh().await;

    store.push_page(products(13..14), Some(13));
    assert!(catalog.set_page(3));
    settle().await;
    assert_eq!(catalog.snapshot().page, 3);

    store.push_page(products(1..4), Some(3));
    catalog.set_category(CategoryFilter::only("Mates"));
    settle().await;

    let snapshot = catalog.snapshot();
    assert_eq!(snapshot.page, 1);

    let requests = store.requests();
    let last = requests.last().unwrap();
    assert_eq!(last.category.as_deref(), Some("Mates"));
    assert_eq!(last.range.from, 0);
    assert_eq!(last.range.to, 5);
}

#[tokio::test]
async fn changes_within_the_quiet_interval_collapse_into_one_request() {
    let store = MockStore::default();
    store.push_page(products(1..3), Some(2));
    let catalog = controller(store.clone());

    catalog.set_category(CategoryFilter::only("Mates"));
    catalog.set_sort_order(SortOrder::PriceAsc);
    settle().await;

    let requests = store.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.category.as_deref(), Some("Mates"));
    assert!(request.order.ascending);
    assert_eq!(request.order.column, "price");
    assert_eq!(request.title_search, None);
    assert_eq!(request.range.from, 0);
    assert_eq!(request.range.to, 5);
    assert!(request.exact_count);
}

#[tokio::test]
async fn rapid_edits_debounce_to_a_single_fetch_with_the_final_term() {
    let store = MockStore::default();
    store.push_page(Vec::new(), Some(0));
    let catalog = controller(store.clone());

    for term in ["t", "te", "ter", "term"] {
        catalog.set_search_term(term);
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    settle().await;

    let requests = store.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].title_search.as_deref(), Some("term"));
}

#[tokio::test]
async fn missing_count_renders_an_empty_single_page() {
    let store = MockStore::default();
    store.push_page(Vec::new(), None);
    let catalog = controller(store.clone());

    catalog.refresh().await;

    let snapshot = catalog.snapshot();
    assert_eq!(snapshot.total_count, 0);
    assert_eq!(snapshot.total_pages, 1);
    assert!(snapshot.items.is_empty());
    assert!(snapshot.error.is_none());
}

#[tokio::test]
async fn failure_clears_items_and_surfaces_the_error() {
    let store = MockStore::default();
    store.push_page(products(1..7), Some(13));
    let catalog = controller(store.clone());
    catalog.refresh().await;
    assert_eq!(catalog.snapshot().items.len(), 6);

    store.push_fail("store unavailable");
    catalog.set_search_term("mate");
    settle().await;

    let snapshot = catalog.snapshot();
    assert!(snapshot.items.is_empty());
    assert_eq!(snapshot.total_count, 0);
    assert!(!snapshot.loading);
    assert!(snapshot.error.as_deref().unwrap().contains("store unavailable"));

    // A user-triggered retry recovers and clears the error
    store.push_page(products(1..3), Some(2));
    catalog.refresh().await;
    let snapshot = catalog.snapshot();
    assert_eq!(snapshot.items.len(), 2);
    assert!(snapshot.error.is_none());
}

#[tokio::test]
async fn loading_keeps_the_previous_page_visible() {
    let store = MockStore::default();
    store.push_page(products(1..7), Some(13));
    let catalog = controller(store.clone());
    catalog.refresh().await;

    store.push_page_after(products(1..3), Some(2), Duration::from_millis(150));
    catalog.set_search_term("mate");
    tokio::time::sleep(Duration::from_millis(80)).await;

    // In flight: still showing the previous page, flagged as loading
    let snapshot = catalog.snapshot();
    assert!(snapshot.loading);
    assert_eq!(snapshot.items.len(), 6);

    tokio::time::sleep(Duration::from_millis(200)).await;
    let snapshot = catalog.snapshot();
    assert!(!snapshot.loading);
    assert_eq!(snapshot.items.len(), 2);
}

#[tokio::test]
async fn stale_response_resolving_late_is_discarded() {
    let store = MockStore::default();
    store.push_page_after(products(1..2), Some(1), Duration::from_millis(150));
    store.push_page(products(2..3), Some(1));
    let catalog = controller(store.clone());

    catalog.set_search_term("slow");
    tokio::time::sleep(Duration::from_millis(60)).await;
    catalog.set_search_term("fast");
    tokio::time::sleep(Duration::from_millis(300)).await;

    let requests = store.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].title_search.as_deref(), Some("slow"));
    assert_eq!(requests[1].title_search.as_deref(), Some("fast"));

    // The older response resolved last; the view must not regress to it
    let snapshot = catalog.snapshot();
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.items[0].id, 2);
    assert!(!snapshot.loading);
}

#[tokio::test]
async fn identical_queries_yield_identical_results() {
    let store = MockStore::default();
    store.push_page(products(1..7), Some(13));
    store.push_page(products(1..7), Some(13));
    let catalog = controller(store.clone());

    catalog.refresh().await;
    let first = catalog.snapshot();
    catalog.refresh().await;
    let second = catalog.snapshot();

    assert_eq!(first.items, second.items);
    assert_eq!(first.total_count, second.total_count);
    assert_eq!(first.page, second.page);

    // Re-setting the current value is not a change and issues no fetch
    let before = store.requests().len();
    catalog.set_search_term("");
    catalog.set_sort_order(SortOrder::Newest);
    settle().await;
    assert_eq!(store.requests().len(), before);
}

#[tokio::test]
async fn clear_filters_returns_to_the_default_query() {
    let store = MockStore::default();
    store.push_page(products(1..3), Some(2));
    let catalog = controller(store.clone());

    catalog.set_search_term("stanley");
    catalog.set_category(CategoryFilter::only("Termos"));
    settle().await;

    store.push_page(products(1..7), Some(13));
    catalog.clear_filters();
    settle().await;

    let query = catalog.query();
    assert_eq!(query.search_term, "");
    assert_eq!(query.category, CategoryFilter::All);
    assert_eq!(query.sort, SortOrder::Newest);
    assert_eq!(query.page, 1);

    let last = store.requests().last().cloned().unwrap();
    assert_eq!(last.category, None);
    assert_eq!(last.title_search, None);
}
