/*
 * Responsibility
 * - Obtain a bearer token from the external identity provider
 * - One POST to the token endpoint per attempt, no retry loop
 */
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("identity provider rejected the request: {status} {message}")]
    Rejected { status: u16, message: String },
    #[error("token response missing access_token")]
    MissingToken,
}

/// Token handed back by the provider. `expires_in` is seconds from now.
#[derive(Debug, Clone)]
pub struct AcquiredToken {
    pub access_token: String,
    pub expires_in: Option<u64>,
}

/// Seam between the session and the identity provider, so tests can swap in
/// a canned provider without standing up an authorization server.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn acquire(&self) -> Result<AcquiredToken, TokenError>;
}

#[derive(Serialize)]
struct PasswordGrantRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    audience: &'a str,
    grant_type: &'static str,
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenEndpointResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Resource-owner password grant against `https://{domain}/oauth/token`,
/// with the audience fixed at construction.
pub struct PasswordGrantProvider {
    http: reqwest::Client,
    token_url: Url,
    client_id: String,
    client_secret: String,
    audience: String,
    username: String,
    password: String,
}

impl PasswordGrantProvider {
    pub fn new(http: reqwest::Client, token_url: Url, config: &Config) -> Self {
        Self {
            http,
            token_url,
            client_id: config.auth_client_id.clone(),
            client_secret: config.auth_client_secret.clone(),
            audience: config.auth_audience.clone(),
            username: config.auth_username.clone(),
            password: config.auth_password.clone(),
        }
    }
}

impl std::fmt::Debug for PasswordGrantProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print credentials
        f.debug_struct("PasswordGrantProvider")
            .field("token_url", &self.token_url.as_str())
            .field("audience", &self.audience)
            .finish()
    }
}

#[async_trait]
impl TokenProvider for PasswordGrantProvider {
    async fn acquire(&self) -> Result<AcquiredToken, TokenError> {
        let request = PasswordGrantRequest {
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            audience: &self.audience,
            grant_type: "password",
            username: &self.username,
            password: &self.password,
        };

        let response = self
            .http
            .post(self.token_url.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body: TokenEndpointResponse = response.json().await?;

        if !status.is_success() {
            return Err(TokenError::Rejected {
                status: status.as_u16(),
                message: body
                    .error_description
                    .or(body.error)
                    .unwrap_or_else(|| "no error description".to_string()),
            });
        }

        let access_token = body.access_token.ok_or(TokenError::MissingToken)?;
        Ok(AcquiredToken {
            access_token,
            expires_in: body.expires_in,
        })
    }
}
