//! Catalog controller: debounce gate, pagination and the view state machine

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use shared::catalog::{CatalogQuery, CategoryFilter, SortOrder, total_pages};
use shared::models::Product;

use super::CatalogStore;
use crate::config::{DEFAULT_DEBOUNCE_MS, DEFAULT_PAGE_SIZE};

/// Tuning knobs for the catalog controller
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    /// Items per page
    pub page_size: u32,
    /// Quiet interval before a scheduled fetch fires
    pub debounce: Duration,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

/// Externally observable catalog state
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    /// Rows of the current page, exactly as the store returned them
    pub items: Vec<Product>,
    pub total_count: u64,
    pub total_pages: u32,
    pub page: u32,
    pub loading: bool,
    pub error: Option<String>,
}

/// Catalog query/pagination/filter controller
///
/// Owns the query state and the result state; every mutation schedules a
/// debounced fetch against the injected store. Cloning yields another handle
/// onto the same controller. Must live on a tokio runtime.
pub struct CatalogController<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for CatalogController<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<S> {
    store: S,
    settings: CatalogSettings,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    query: CatalogQuery,
    items: Vec<Product>,
    total_count: u64,
    loading: bool,
    error: Option<String>,
    /// Sequence number of the most recently issued request
    issued_seq: u64,
    /// Sequence number of the last applied response
    applied_seq: u64,
    /// Cancels the pending debounce timer
    pending: Option<CancellationToken>,
}

impl<S> CatalogController<S>
where
    S: CatalogStore + 'static,
{
    /// Create a controller over a data-store client
    pub fn new(store: S, settings: CatalogSettings) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                settings,
                state: Mutex::new(State::default()),
            }),
        }
    }

    /// Current view state
    pub fn snapshot(&self) -> CatalogSnapshot {
        let state = self.inner.state.lock();
        CatalogSnapshot {
            items: state.items.clone(),
            total_count: state.total_count,
            total_pages: total_pages(state.total_count, self.inner.settings.page_size),
            page: state.query.page,
            loading: state.loading,
            error: state.error.clone(),
        }
    }

    /// Current query state
    pub fn query(&self) -> CatalogQuery {
        self.inner.state.lock().query.clone()
    }

    /// Update the search term; resets to page 1
    pub fn set_search_term(&self, term: impl Into<String>) {
        let term = term.into();
        self.mutate_query(|query| {
            if query.search_term == term {
                return false;
            }
            query.search_term = term;
            query.page = 1;
            true
        });
    }

    /// Update the category filter; resets to page 1
    pub fn set_category(&self, category: CategoryFilter) {
        self.mutate_query(|query| {
            if query.category == category {
                return false;
            }
            query.category = category;
            query.page = 1;
            true
        });
    }

    /// Update the sort order; resets to page 1
    pub fn set_sort_order(&self, sort: SortOrder) {
        self.mutate_query(|query| {
            if query.sort == sort {
                return false;
            }
            query.sort = sort;
            query.page = 1;
            true
        });
    }

    /// Navigate to a page
    ///
    /// Out-of-range requests are rejected rather than clamped so caller bugs
    /// stay visible. Returns whether the page was accepted.
    pub fn set_page(&self, page: u32) -> bool {
        {
            let mut state = self.inner.state.lock();
            let last = total_pages(state.total_count, self.inner.settings.page_size);
            if page < 1 || page > last {
                warn!(page, total_pages = last, "Rejected out-of-range page request");
                return false;
            }
            if state.query.page == page {
                return true;
            }
            state.query.page = page;
        }
        self.schedule_fetch();
        true
    }

    /// Reset search, category, sort and page to their defaults
    pub fn clear_filters(&self) {
        self.mutate_query(|query| {
            if *query == CatalogQuery::default() {
                return false;
            }
            *query = CatalogQuery::default();
            true
        });
    }

    /// Fetch immediately, bypassing the quiet interval
    ///
    /// Used for the initial load and for a user-triggered retry after a
    /// failure.
    pub async fn refresh(&self) {
        self.cancel_pending();
        Inner::fetch(Arc::clone(&self.inner)).await;
    }

    fn mutate_query(&self, apply: impl FnOnce(&mut CatalogQuery) -> bool) {
        let changed = {
            let mut state = self.inner.state.lock();
            apply(&mut state.query)
        };
        if changed {
            self.schedule_fetch();
        }
    }

    fn cancel_pending(&self) {
        if let Some(token) = self.inner.state.lock().pending.take() {
            token.cancel();
        }
    }

    /// Schedule a fetch after the quiet interval, superseding any pending one
    fn schedule_fetch(&self) {
        let token = CancellationToken::new();
        {
            let mut state = self.inner.state.lock();
            if let Some(previous) = state.pending.replace(token.clone()) {
                previous.cancel();
            }
        }

        let inner = Arc::downgrade(&self.inner);
        let quiet = self.inner.settings.debounce;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(quiet) => {
                    // A dropped controller abandons the pending fetch
                    if let Some(inner) = Weak::upgrade(&inner) {
                        Inner::fetch(inner).await;
                    }
                }
            }
        });
    }
}

impl<S> Inner<S>
where
    S: CatalogStore + 'static,
{
    async fn fetch(self: Arc<Self>) {
        let (request, seq) = {
            let mut state = self.state.lock();
            let seq = state.issued_seq + 1;
            state.issued_seq = seq;
            state.loading = true;
            (state.query.to_page_request(self.settings.page_size), seq)
        };
        debug!(seq, ?request, "Issuing catalog page request");

        let result = self.store.fetch_page(&request).await;

        let mut state = self.state.lock();
        if seq <= state.applied_seq {
            // A response issued earlier resolved after a newer one
            warn!(seq, applied = state.applied_seq, "Discarding stale catalog response");
            return;
        }
        state.applied_seq = seq;
        let latest = seq == state.issued_seq;

        match result {
            Ok(page) => {
                state.total_count = page.count.unwrap_or(0);
                state.items = page.rows;
                state.error = None;
                // Keep the recorded page inside the shrunken result set
                let last = total_pages(state.total_count, self.settings.page_size);
                if state.query.page > last {
                    state.query.page = last;
                }
                debug!(
                    seq,
                    items = state.items.len(),
                    total = state.total_count,
                    "Catalog page applied"
                );
            }
            Err(e) => {
                // Explicit empty state on failure, never stale data
                error!(seq, error = %e, "Catalog page request failed");
                state.items.clear();
                state.total_count = 0;
                state.error = Some(e.to_string());
            }
        }

        if latest {
            state.loading = false;
        }
    }
}

impl<S> Drop for Inner<S> {
    fn drop(&mut self) {
        if let Some(token) = self.state.get_mut().pending.take() {
            token.cancel();
        }
    }
}
