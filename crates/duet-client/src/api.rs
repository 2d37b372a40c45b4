//! Transport seam for the two status endpoints.

use async_trait::async_trait;
use duet_api_models::{ErrorBody, HEALTH_PATH, HealthResponse, ROOT_PATH, RootResponse};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Endpoints consumed by the status view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET /health`.
    Health,
    /// `GET /`.
    Root,
}

impl Endpoint {
    /// Request path relative to the API base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Health => HEALTH_PATH,
            Self::Root => ROOT_PATH,
        }
    }

    /// Short label used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Root => "root",
        }
    }
}

/// Typed access to the status endpoints.
///
/// Futures are not required to be `Send` so browser transports can hold JS values
/// across await points. Implementations perform exactly one request per call: no
/// retry and no caching.
#[async_trait(?Send)]
pub trait StatusApi {
    /// Fetch the backend liveness flag.
    async fn fetch_health(&self) -> Result<HealthResponse, ApiError>;
    /// Fetch the backend greeting.
    async fn fetch_root(&self) -> Result<RootResponse, ApiError>;
}

/// Join a base URL and an endpoint path without doubling the separator.
#[must_use]
pub fn endpoint_url(base_url: &str, endpoint: Endpoint) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), endpoint.path())
}

/// Turn a received status and body into a typed value or an [`ApiError`].
///
/// Non-2xx bodies are probed for an `{"detail": ...}` document.
///
/// # Errors
///
/// Returns an HTTP error for non-success statuses and a decode error when a
/// success body does not match `T`.
pub fn decode_body<T>(status: u16, body: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    if !(200..300).contains(&status) {
        let detail = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .map(|error| error.detail);
        return Err(ApiError::http(status, detail));
    }
    serde_json::from_slice(body).map_err(|err| ApiError::decode(err.to_string()))
}
