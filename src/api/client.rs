/*
 * Responsibility
 * - Shared HTTP plumbing for every resource gateway
 * - Attach `Authorization: Bearer <token>` whenever the session holds one
 * - Map each response to a typed success or a structured error, honoring
 *   the backend's `success` envelope when it sends one
 */
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::error::ApiError;
use crate::session::SessionHandle;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    session: SessionHandle,
}

/// Probe for the `{success, message}` envelope the backend wraps most
/// bodies in. Both fields default to absent so a bare payload (or an empty
/// body) probes cleanly.
#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
}

impl ApiClient {
    pub fn new(http: reqwest::Client, base: Url, session: SessionHandle) -> Self {
        Self {
            http,
            base,
            session,
        }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Error when no token is held. List calls go through this before any
    /// request is built, so an unauthenticated screen never touches the
    /// network.
    pub fn require_token(&self) -> Result<(), ApiError> {
        if self.session.current().is_authenticated() {
            Ok(())
        } else {
            Err(ApiError::NoSession)
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.current().token.as_deref() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        context: &'static str,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let mut url = self.endpoint(segments);
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        let req = self.authorize(self.http.get(url));
        self.execute(context, req).await
    }

    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        context: &'static str,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.authorize(self.http.post(self.endpoint(segments)).json(body));
        self.execute(context, req).await
    }

    pub async fn patch_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        context: &'static str,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.authorize(self.http.patch(self.endpoint(segments)).json(body));
        self.execute(context, req).await
    }

    /// DELETE acknowledges with an envelope (or nothing at all); there is
    /// no payload to decode.
    pub async fn delete(&self, context: &'static str, segments: &[&str]) -> Result<(), ApiError> {
        let req = self.authorize(self.http.delete(self.endpoint(segments)));
        let response = req.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        check_outcome(context, status, &bytes)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        context: &'static str,
        req: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = req.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        tracing::debug!(context, status = status.as_u16(), "api response");
        decode_body(context, status, &bytes)
    }
}

/// Outcome rule, standardized across every operation: an explicit
/// `success` field in the body decides; with no such field the HTTP status
/// decides; a missing indicator on a success status is a success.
fn check_outcome(context: &'static str, status: StatusCode, bytes: &[u8]) -> Result<(), ApiError> {
    let envelope: Envelope = serde_json::from_slice(bytes).unwrap_or_default();

    match envelope.success {
        Some(false) => Err(ApiError::Rejected {
            status: Some(status.as_u16()),
            message: envelope
                .message
                .unwrap_or_else(|| format!("{context} request failed")),
        }),
        Some(true) => Ok(()),
        None if status.is_success() => Ok(()),
        None => Err(ApiError::Rejected {
            status: Some(status.as_u16()),
            message: envelope
                .message
                .unwrap_or_else(|| format!("{context} request failed with HTTP {status}")),
        }),
    }
}

fn decode_body<T: DeserializeOwned>(
    context: &'static str,
    status: StatusCode,
    bytes: &[u8],
) -> Result<T, ApiError> {
    check_outcome(context, status, bytes)?;
    serde_json::from_slice(bytes).map_err(|e| ApiError::decode(context, e))
}
