/*
 * Responsibility
 * - Top-level error type tying the layer errors together
 * - Each layer keeps its own enum; this is the seam the binary reports from
 */
use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;
use crate::services::auth::provider::TokenError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("http client: {0}")]
    Http(#[from] reqwest::Error),
}
