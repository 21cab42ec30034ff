//! Client configuration

use std::time::Duration;

use shared::models::CategorySet;

use crate::catalog::CatalogSettings;

/// Default catalog page size
pub const DEFAULT_PAGE_SIZE: u32 = 6;

/// Default debounce quiet interval in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Default storage bucket for product images
pub const DEFAULT_BUCKET: &str = "products";

/// Default endpoint of the hosted email delivery service
pub const DEFAULT_EMAIL_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Email delivery settings (template send service)
#[derive(Debug, Clone)]
pub struct EmailSettings {
    /// Send endpoint of the delivery service
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    /// Destination mailbox injected into the template
    pub to_email: String,
}

impl EmailSettings {
    pub fn new(
        service_id: impl Into<String>,
        template_id: impl Into<String>,
        public_key: impl Into<String>,
        to_email: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: DEFAULT_EMAIL_ENDPOINT.to_string(),
            service_id: service_id.into(),
            template_id: template_id.into(),
            public_key: public_key.into(),
            to_email: to_email.into(),
        }
    }

    /// Override the send endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Client configuration for connecting to the hosted platform
///
/// # Environment variables
///
/// All knobs can be set through the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | TIENDA_URL | http://localhost:54321 | Platform base URL |
/// | TIENDA_API_KEY | (empty) | Public API key |
/// | TIENDA_BUCKET | products | Storage bucket for product images |
/// | TIENDA_TIMEOUT | 30 | Request timeout in seconds |
/// | TIENDA_PAGE_SIZE | 6 | Catalog page size |
/// | TIENDA_DEBOUNCE_MS | 300 | Catalog debounce quiet interval |
/// | TIENDA_CATEGORIES | (empty) | Comma-separated category names |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Platform base URL (e.g., "https://example.supabase.co")
    pub base_url: String,

    /// Public API key sent with every request
    pub api_key: String,

    /// Storage bucket for product images
    pub bucket: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Catalog page size
    pub page_size: u32,

    /// Debounce quiet interval in milliseconds
    pub debounce_ms: u64,

    /// Fixed category set driving validation and the filter UI
    pub categories: CategorySet,

    /// Email delivery settings for the contact form
    pub email: Option<EmailSettings>,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            bucket: DEFAULT_BUCKET.to_string(),
            timeout: 30,
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            categories: CategorySet::default(),
            email: None,
        }
    }

    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self {
            base_url: std::env::var("TIENDA_URL")
                .unwrap_or_else(|_| "http://localhost:54321".into()),
            api_key: std::env::var("TIENDA_API_KEY").unwrap_or_default(),
            bucket: std::env::var("TIENDA_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.into()),
            timeout: std::env::var("TIENDA_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            page_size: std::env::var("TIENDA_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PAGE_SIZE),
            debounce_ms: std::env::var("TIENDA_DEBOUNCE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_DEBOUNCE_MS),
            categories: std::env::var("TIENDA_CATEGORIES")
                .map(|v| {
                    CategorySet::new(
                        v.split(',')
                            .map(str::trim)
                            .filter(|name| !name.is_empty())
                            .map(str::to_string),
                    )
                })
                .unwrap_or_default(),
            email: None,
        }
    }

    /// Set the storage bucket
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the catalog page size
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the debounce quiet interval
    pub fn with_debounce_ms(mut self, millis: u64) -> Self {
        self.debounce_ms = millis;
        self
    }

    /// Set the category set
    pub fn with_categories(mut self, categories: CategorySet) -> Self {
        self.categories = categories;
        self
    }

    /// Set the email delivery settings
    pub fn with_email(mut self, email: EmailSettings) -> Self {
        self.email = Some(email);
        self
    }

    /// The debounce quiet interval as a duration
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Catalog controller settings derived from this configuration
    pub fn catalog_settings(&self) -> CatalogSettings {
        CatalogSettings {
            page_size: self.page_size,
            debounce: self.debounce(),
        }
    }

    /// Create a data-store client from this configuration
    pub fn build_store_client(&self) -> super::StoreClient {
        super::StoreClient::new(self)
    }

    /// Create an auth client from this configuration
    pub fn build_auth_client(&self) -> super::AuthClient {
        super::AuthClient::new(self)
    }

    /// Create an object-storage client from this configuration
    pub fn build_storage_client(&self) -> super::StorageClient {
        super::StorageClient::new(self)
    }

    /// Create an email client, if delivery settings are configured
    pub fn build_email_client(&self) -> Option<super::EmailClient> {
        self.email
            .clone()
            .map(|settings| super::EmailClient::new(settings, self.timeout))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:54321", "")
    }
}
