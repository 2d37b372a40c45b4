//! `fetch`-backed status client.

use async_trait::async_trait;
use duet_api_models::{HealthResponse, RootResponse};
use duet_client::{ApiError, Endpoint, StatusApi, decode_body, endpoint_url};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;

/// [`StatusApi`] over the browser `fetch` API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowserApiClient {
    base_url: String,
}

impl BrowserApiClient {
    /// Client rooted at `base_url` (absolute, or relative to the page origin).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    async fn get_json<T>(&self, endpoint: Endpoint) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = endpoint_url(&self.base_url, endpoint);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|err| ApiError::transport(format!("request to {url} failed: {err}")))?;
        let body = response
            .binary()
            .await
            .map_err(|err| ApiError::transport(format!("failed to read response body: {err}")))?;
        decode_body(response.status(), &body)
    }
}

#[async_trait(?Send)]
impl StatusApi for BrowserApiClient {
    async fn fetch_health(&self) -> Result<HealthResponse, ApiError> {
        self.get_json(Endpoint::Health).await
    }

    async fn fetch_root(&self) -> Result<RootResponse, ApiError> {
        self.get_json(Endpoint::Root).await
    }
}
