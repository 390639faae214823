use thiserror::Error;

/// Failures crossing the gateway boundary. Every variant is terminal for
/// the attempt that produced it; screens surface the message in their
/// error slot and stay interactive.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A token-gated call was attempted with no token held. The request is
    /// never sent.
    #[error("not signed in")]
    NoSession,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered and said no, either through an explicit
    /// `success: false` envelope or a non-success HTTP status.
    #[error("{message}")]
    Rejected { status: Option<u16>, message: String },

    /// The response did not match the expected schema.
    #[error("malformed {context} response: {detail}")]
    Decode {
        context: &'static str,
        detail: String,
    },
}

impl ApiError {
    pub fn decode(context: &'static str, e: serde_json::Error) -> Self {
        Self::Decode {
            context,
            detail: e.to_string(),
        }
    }
}
