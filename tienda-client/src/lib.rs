//! Tienda Client - storefront client over the hosted backend platform
//!
//! Provides the catalog query controller plus thin clients for the hosted
//! data store, auth, object storage and email delivery services.

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod email;
pub mod error;
mod http;
pub mod storage;
pub mod store;

pub use config::{ClientConfig, EmailSettings};
pub use error::{ClientError, ClientResult};

// Service clients
pub use auth::{AuthClient, Session, UserInfo};
pub use email::EmailClient;
pub use storage::StorageClient;
pub use store::StoreClient;

// Catalog controller
pub use catalog::{CatalogController, CatalogSettings, CatalogSnapshot, CatalogStore};

// Admin service
pub use admin::{ObjectStore, ProductAdmin, ProductWriter};

// Re-export shared types for convenience
pub use shared::catalog::{CatalogQuery, CategoryFilter, PageRequest, SortOrder, StorePage};
pub use shared::models::{
    CategorySet, ContactMessage, ImageUpload, Product, ProductDraft, ProductInsert, ProductPatch,
};
