//! Catalog query controller
//!
//! Coordinates search debouncing, category filtering, sort order and
//! server-side paging, and owns the observable view state.

mod controller;

use async_trait::async_trait;

use shared::catalog::{PageRequest, StorePage};
use shared::models::Product;

use crate::ClientResult;

pub use controller::{CatalogController, CatalogSettings, CatalogSnapshot};

/// Read seam over the hosted data store
///
/// The controller is generic over this trait so tests can drive it without
/// a network.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Execute one fully specified page request
    async fn fetch_page(&self, request: &PageRequest) -> ClientResult<StorePage<Product>>;
}
