//! HTTP plumbing shared by the service clients

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::{ClientError, ClientResult};

/// Build a reqwest client with the configured timeout
pub(crate) fn build_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .expect("Failed to build HTTP client")
}

/// Map an error status onto the client error taxonomy
///
/// The store answers 406 when a single-object read matches no rows.
pub(crate) async fn error_for_status(response: Response) -> ClientError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::FORBIDDEN => ClientError::Forbidden(text),
        StatusCode::NOT_FOUND | StatusCode::NOT_ACCEPTABLE => ClientError::NotFound(text),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ClientError::Validation(text),
        _ => ClientError::Internal(text),
    }
}

/// Decode a success response as JSON
pub(crate) async fn handle_json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    if !response.status().is_success() {
        return Err(error_for_status(response).await);
    }
    response.json().await.map_err(Into::into)
}

/// Check a success response, discarding the body
pub(crate) async fn handle_empty(response: Response) -> ClientResult<()> {
    if !response.status().is_success() {
        return Err(error_for_status(response).await);
    }
    Ok(())
}
