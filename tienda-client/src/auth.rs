//! Auth client for the hosted session service
//!
//! Sessions gate the admin mutations (product create/update/delete); the
//! catalog itself is read anonymously with the public API key.

use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};

use crate::http::{build_client, handle_empty, handle_json};
use crate::{ClientConfig, ClientResult};

/// Authenticated user info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    #[serde(default)]
    pub email: String,
}

/// Session issued by the auth service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    /// Unix timestamp the access token expires at
    pub expires_at: Option<u64>,
    pub user: UserInfo,
}

impl Session {
    /// Whether the access token is past its expiry
    pub fn is_expired(&self) -> bool {
        let Some(expires_at) = self.expires_at else {
            return false;
        };
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        now >= expires_at
    }
}

/// HTTP client for the hosted auth service
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl AuthClient {
    /// Create a new auth client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: build_client(config.timeout),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// Sign in with email and password
    pub async fn sign_in(&self, email: &str, password: &str) -> ClientResult<Session> {
        #[derive(Serialize)]
        struct PasswordGrant<'a> {
            email: &'a str,
            password: &'a str,
        }

        let response = self
            .client
            .post(format!("{}/auth/v1/token", self.base_url))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.api_key)
            .json(&PasswordGrant { email, password })
            .send()
            .await?;

        handle_json(response).await
    }

    /// Fetch the user behind an existing session
    pub async fn user(&self, session: &Session) -> ClientResult<UserInfo> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.api_key)
            .header(AUTHORIZATION, format!("Bearer {}", session.access_token))
            .send()
            .await?;

        handle_json(response).await
    }

    /// Sign out, revoking the session
    pub async fn sign_out(&self, session: &Session) -> ClientResult<()> {
        let response = self
            .client
            .post(format!("{}/auth/v1/logout", self.base_url))
            .header("apikey", &self.api_key)
            .header(AUTHORIZATION, format!("Bearer {}", session.access_token))
            .send()
            .await?;

        handle_empty(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(expires_at: Option<u64>) -> Session {
        Session {
            access_token: "token".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at,
            user: UserInfo {
                id: "user-1".to_string(),
                email: "admin@example.com".to_string(),
            },
        }
    }

    #[test]
    fn test_session_without_expiry_never_expires() {
        assert!(!session(None).is_expired());
    }

    #[test]
    fn test_session_expiry() {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();

        assert!(!session(Some(now + 3600)).is_expired());
        assert!(session(Some(now - 3600)).is_expired());
    }
}
