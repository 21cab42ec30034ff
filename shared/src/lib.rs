//! Shared types for the Tienda storefront
//!
//! Domain models, catalog query types and validation helpers used by the
//! client crate.

pub mod catalog;
pub mod error;
pub mod models;
pub mod validation;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Catalog re-exports (query builder types)
pub use catalog::{
    CatalogQuery, CategoryFilter, OrderBy, PageRequest, RowRange, SortOrder, StorePage,
    total_pages,
};
pub use error::ValidationError;
