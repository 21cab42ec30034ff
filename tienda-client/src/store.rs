//! Data store client
//!
//! Thin REST client over the hosted relational store. List requests carry
//! their filters and ordering as query parameters and the row range as a
//! `Range` header; the exact row count comes back in `Content-Range`.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_RANGE, RANGE};

use shared::catalog::{PageRequest, StorePage};
use shared::models::{Product, ProductInsert, ProductPatch};

use crate::admin::ProductWriter;
use crate::catalog::CatalogStore;
use crate::http::{build_client, error_for_status, handle_empty, handle_json};
use crate::{ClientConfig, ClientError, ClientResult};

/// Table holding the product rows
const PRODUCTS_TABLE: &str = "products";

/// HTTP client for the hosted relational store
#[derive(Debug, Clone)]
pub struct StoreClient {
    client: Client,
    base_url: String,
    api_key: String,
    token: Option<String>,
}

impl StoreClient {
    /// Create a new store client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: build_client(config.timeout),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            token: None,
        }
    }

    /// Attach a session token for authenticated writes
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Anonymous reads authenticate with the public API key
    fn bearer(&self) -> String {
        format!("Bearer {}", self.token.as_deref().unwrap_or(&self.api_key))
    }

    /// Fetch a single product by id
    pub async fn get_product(&self, id: i64) -> ClientResult<Product> {
        let id_filter = format!("eq.{id}");
        let response = self
            .client
            .get(self.table_url(PRODUCTS_TABLE))
            .query(&[("select", "*"), ("id", id_filter.as_str())])
            .header("apikey", &self.api_key)
            .header(AUTHORIZATION, self.bearer())
            .header(ACCEPT, "application/vnd.pgrst.object+json")
            .send()
            .await?;

        handle_json(response).await
    }
}

/// Query parameters for a page request
pub(crate) fn page_query_params(request: &PageRequest) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];
    if let Some(category) = &request.category {
        params.push(("category".to_string(), format!("eq.{category}")));
    }
    if let Some(term) = &request.title_search {
        params.push(("title".to_string(), format!("ilike.*{term}*")));
    }
    let direction = if request.order.ascending { "asc" } else { "desc" };
    params.push((
        "order".to_string(),
        format!("{}.{direction}", request.order.column),
    ));
    params
}

/// Parse the total row count from a `Content-Range` header value
///
/// The store answers `0-5/13`; an unknown total is `*`.
pub(crate) fn parse_content_range(value: &str) -> Option<u64> {
    value.rsplit('/').next()?.trim().parse().ok()
}

#[async_trait]
impl CatalogStore for StoreClient {
    async fn fetch_page(&self, request: &PageRequest) -> ClientResult<StorePage<Product>> {
        let range = request.range;
        let mut builder = self
            .client
            .get(self.table_url(PRODUCTS_TABLE))
            .query(&page_query_params(request))
            .header("apikey", &self.api_key)
            .header(AUTHORIZATION, self.bearer())
            .header("Range-Unit", "items")
            .header(RANGE, format!("{}-{}", range.from, range.to));
        if request.exact_count {
            builder = builder.header("Prefer", "count=exact");
        }

        let response = builder.send().await?;
        if !response.status().is_success() {
            return Err(error_for_status(response).await);
        }

        let count = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range);
        let rows = response.json().await?;

        Ok(StorePage { rows, count })
    }
}

#[async_trait]
impl ProductWriter for StoreClient {
    async fn insert_product(&self, row: &ProductInsert) -> ClientResult<Product> {
        let response = self
            .client
            .post(self.table_url(PRODUCTS_TABLE))
            .json(row)
            .header("apikey", &self.api_key)
            .header(AUTHORIZATION, self.bearer())
            .header("Prefer", "return=representation")
            .send()
            .await?;

        let mut created: Vec<Product> = handle_json(response).await?;
        created
            .pop()
            .ok_or_else(|| ClientError::InvalidResponse("Store returned no row for insert".into()))
    }

    async fn update_product(&self, id: i64, patch: &ProductPatch) -> ClientResult<Product> {
        let response = self
            .client
            .patch(self.table_url(PRODUCTS_TABLE))
            .query(&[("id", format!("eq.{id}"))])
            .json(patch)
            .header("apikey", &self.api_key)
            .header(AUTHORIZATION, self.bearer())
            .header("Prefer", "return=representation")
            .send()
            .await?;

        let mut updated: Vec<Product> = handle_json(response).await?;
        updated
            .pop()
            .ok_or_else(|| ClientError::NotFound(format!("Product {id}")))
    }

    async fn delete_product(&self, id: i64) -> ClientResult<()> {
        let response = self
            .client
            .delete(self.table_url(PRODUCTS_TABLE))
            .query(&[("id", format!("eq.{id}"))])
            .header("apikey", &self.api_key)
            .header(AUTHORIZATION, self.bearer())
            .send()
            .await?;

        handle_empty(response).await
    }
}
