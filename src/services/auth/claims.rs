use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

/// Permissions the backend grants to the catalog owner role. All of them
/// must be present in the token's `permissions` claim for the owner
/// capability to be enabled.
pub const OWNER_PERMISSIONS: [&str; 9] = [
    "delete:birds",
    "delete:habitats",
    "get:birds",
    "get:habitats",
    "get:regions",
    "patch:birds",
    "patch:habitats",
    "post:birds",
    "post:habitats",
];

#[derive(Debug, thiserror::Error)]
pub enum ClaimsError {
    #[error("token is not a three-segment JWT")]
    NotAJwt,
    #[error("payload segment is not valid base64url")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not a JSON claims object: {0}")]
    Json(#[from] serde_json::Error),
}

/// Claims carried in the access token payload.
///
/// NOTE:
/// - Decoded WITHOUT signature verification. The identity provider signed
///   the token and the backend verifies it on every API call; this client
///   only reads claims to decide which controls to offer.
/// - Unknown claims are ignored; absent claims fall back via `#[serde(default)]`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    #[serde(default)]
    pub permissions: Vec<String>,

    #[serde(default)]
    pub iss: Option<String>,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub exp: Option<u64>,
    #[serde(default)]
    pub iat: Option<u64>,
}

/// Decode the payload segment of a JWT without verifying its signature.
pub fn decode_unverified(token: &str) -> Result<AccessTokenClaims, ClaimsError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [_, payload, _] = segments.as_slice() else {
        return Err(ClaimsError::NotAJwt);
    };

    let bytes = URL_SAFE_NO_PAD.decode(payload)?;
    let claims = serde_json::from_slice::<AccessTokenClaims>(&bytes)?;
    Ok(claims)
}

/// True iff the claim set is a superset of [`OWNER_PERMISSIONS`].
pub fn owner_capability(claims: &AccessTokenClaims) -> bool {
    OWNER_PERMISSIONS
        .iter()
        .all(|required| claims.permissions.iter().any(|held| held == required))
}

/// Capability for a raw token string. A malformed token is a viewer, never
/// an error: this flag only gates UI affordances.
pub fn capability_for(token: &str) -> bool {
    match decode_unverified(token) {
        Ok(claims) => owner_capability(&claims),
        Err(e) => {
            tracing::debug!(error = %e, "token claims undecodable, treating as viewer");
            false
        }
    }
}
