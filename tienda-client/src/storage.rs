//! Object storage client
//!
//! Uploads product images to the hosted bucket and resolves their public
//! URLs. Images are validated and re-encoded as JPEG before upload.

use std::io::Cursor;
use std::path::Path;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use shared::models::ImageUpload;

use crate::admin::ObjectStore;
use crate::http::{build_client, handle_empty};
use crate::{ClientConfig, ClientError, ClientResult};

/// Maximum accepted image payload (4MB)
const MAX_IMAGE_SIZE: usize = 4 * 1024 * 1024;

/// Accepted input formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality for re-encoded product images
const JPEG_QUALITY: u8 = 85;

/// Validate an image payload and re-encode it as JPEG
pub fn prepare_image(upload: &ImageUpload) -> ClientResult<Vec<u8>> {
    if upload.bytes.is_empty() {
        return Err(ClientError::Validation("Empty file provided".into()));
    }
    if upload.bytes.len() > MAX_IMAGE_SIZE {
        return Err(ClientError::Validation(format!(
            "File too large. Maximum size is {} bytes ({}MB)",
            MAX_IMAGE_SIZE,
            MAX_IMAGE_SIZE / 1024 / 1024
        )));
    }

    let ext = Path::new(&upload.filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .ok_or_else(|| {
            ClientError::Validation(format!("Invalid file extension for: {}", upload.filename))
        })?;
    if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Err(ClientError::Validation(format!(
            "Unsupported file format '{}'. Supported: {}",
            ext,
            SUPPORTED_FORMATS.join(", ")
        )));
    }

    let img = image::load_from_memory(&upload.bytes)
        .map_err(|e| ClientError::Validation(format!("Invalid image ({ext}): {e}")))?;

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb.write_with_encoder(encoder)
            .map_err(|e| ClientError::Internal(format!("Failed to encode image: {e}")))?;
    }

    Ok(buffer)
}

/// HTTP client for the hosted object storage
#[derive(Debug, Clone)]
pub struct StorageClient {
    client: Client,
    base_url: String,
    api_key: String,
    bucket: String,
    token: Option<String>,
}

impl StorageClient {
    /// Create a new storage client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: build_client(config.timeout),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            bucket: config.bucket.clone(),
            token: None,
        }
    }

    /// Attach a session token for authenticated uploads
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token.as_deref().unwrap_or(&self.api_key))
    }

    /// Public URL for an object in the bucket
    pub fn object_public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, path
        )
    }
}

#[async_trait]
impl ObjectStore for StorageClient {
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> ClientResult<String> {
        let content_type = mime_guess::from_path(path).first_or_octet_stream();
        let response = self
            .client
            .post(format!(
                "{}/storage/v1/object/{}/{}",
                self.base_url, self.bucket, path
            ))
            .header("apikey", &self.api_key)
            .header(AUTHORIZATION, self.bearer())
            .header(CONTENT_TYPE, content_type.as_ref())
            .body(bytes)
            .send()
            .await?;

        handle_empty(response).await.map_err(|e| match e {
            ClientError::Internal(msg) => ClientError::Storage(msg),
            other => other,
        })?;

        Ok(self.object_public_url(path))
    }

    async fn remove(&self, path: &str) -> ClientResult<()> {
        let response = self
            .client
            .delete(format!(
                "{}/storage/v1/object/{}/{}",
                self.base_url, self.bucket, path
            ))
            .header("apikey", &self.api_key)
            .header(AUTHORIZATION, self.bearer())
            .send()
            .await?;

        handle_empty(response).await.map_err(|e| match e {
            ClientError::Internal(msg) => ClientError::Storage(msg),
            other => other,
        })
    }
}
