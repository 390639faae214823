/*
 * Responsibility
 * - Load environment configuration (backend base URL, identity-provider settings)
 * - Validate eagerly: missing or unparsable values fail startup
 */
use std::fmt;

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub app_env: AppEnv,

    /// Base URL of the catalog backend, e.g. `https://birds.example.com`.
    pub api_base_url: Url,

    pub auth_domain: String,
    pub auth_client_id: String,
    pub auth_client_secret: String,
    pub auth_audience: String,
    pub auth_username: String,
    pub auth_password: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let app_env = AppEnv::from_env();

        let api_base_url =
            std::env::var("API_BASE_URL").map_err(|_| ConfigError::Missing("API_BASE_URL"))?;
        let api_base_url =
            Url::parse(&api_base_url).map_err(|_| ConfigError::Invalid("API_BASE_URL"))?;

        let auth_domain =
            std::env::var("AUTH_DOMAIN").map_err(|_| ConfigError::Missing("AUTH_DOMAIN"))?;
        let auth_client_id =
            std::env::var("AUTH_CLIENT_ID").map_err(|_| ConfigError::Missing("AUTH_CLIENT_ID"))?;
        let auth_client_secret = std::env::var("AUTH_CLIENT_SECRET")
            .map_err(|_| ConfigError::Missing("AUTH_CLIENT_SECRET"))?;
        let auth_audience =
            std::env::var("AUTH_AUDIENCE").map_err(|_| ConfigError::Missing("AUTH_AUDIENCE"))?;
        let auth_username =
            std::env::var("AUTH_USERNAME").map_err(|_| ConfigError::Missing("AUTH_USERNAME"))?;
        let auth_password =
            std::env::var("AUTH_PASSWORD").map_err(|_| ConfigError::Missing("AUTH_PASSWORD"))?;

        Ok(Self {
            app_env,
            api_base_url,
            auth_domain,
            auth_client_id,
            auth_client_secret,
            auth_audience,
            auth_username,
            auth_password,
        })
    }

    /// Token endpoint of the identity provider.
    pub fn token_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&format!("https://{}/oauth/token", self.auth_domain))
            .map_err(|_| ConfigError::Invalid("AUTH_DOMAIN"))
    }
}
