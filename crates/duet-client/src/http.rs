//! Native transport backed by `reqwest`.

use async_trait::async_trait;
use duet_api_models::{HealthResponse, RootResponse};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::api::{Endpoint, StatusApi, decode_body, endpoint_url};
use crate::error::ApiError;

/// [`StatusApi`] implementation for CLIs and native tooling.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
}

impl HttpApiClient {
    /// Client with default `reqwest` settings.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Client reusing a preconfigured `reqwest::Client` (timeouts, default headers).
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Base URL every endpoint path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T>(&self, endpoint: Endpoint) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = endpoint_url(&self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| ApiError::transport(format!("request to {url} failed: {err}")))?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| ApiError::transport(format!("failed to read response body: {err}")))?;
        decode_body(status, &bytes)
    }
}

#[async_trait(?Send)]
impl StatusApi for HttpApiClient {
    async fn fetch_health(&self) -> Result<HealthResponse, ApiError> {
        self.get_json(Endpoint::Health).await
    }

    async fn fetch_root(&self) -> Result<RootResponse, ApiError> {
        self.get_json(Endpoint::Root).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{FALLBACK_MESSAGE, ServiceStatus, load_status};
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn healthy_backend_resolves_ok() {
        let server = MockServer::start_async().await;
        let health = server.mock(|when, then| {
            when.method(GET).path("/health");
            then.status(200).json_body(json!({"ok": true}));
        });
        let root = server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200)
                .json_body(json!({"message": "the server is now active"}));
        });

        let client = HttpApiClient::new(server.base_url());
        let state = load_status(&client).await;

        health.assert();
        root.assert();
        assert!(!state.loading);
        assert_eq!(state.status, ServiceStatus::Ok);
        assert_eq!(state.message, "the server is now active");
    }

    #[tokio::test]
    async fn error_statuses_map_to_down_and_fallback() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/health");
            then.status(500);
        });
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(404).json_body(json!({"detail": "Not found"}));
        });

        let client = HttpApiClient::new(format!("{}/", server.base_url()));
        assert_eq!(client.fetch_health().await, Err(ApiError::http(500, None)));
        assert_eq!(
            client.fetch_root().await,
            Err(ApiError::http(404, Some("Not found".to_string())))
        );

        let state = load_status(&client).await;
        assert_eq!(state.status, ServiceStatus::Down);
        assert_eq!(state.message, FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() -> Result<(), std::io::Error> {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        drop(listener);

        let client = HttpApiClient::new(format!("http://{addr}"));
        let err = match client.fetch_health().await {
            Err(err) => err,
            Ok(body) => panic!("expected transport failure, got {body:?}"),
        };
        assert_eq!(err.status, None);

        let state = load_status(&client).await;
        assert_eq!(state.status, ServiceStatus::Down);
        assert_eq!(state.message, FALLBACK_MESSAGE);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_bodies_fail_to_decode() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/health");
            then.status(200).json_body(json!({"ok": "yes"}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200).body("not json");
        });

        let client = HttpApiClient::new(server.base_url());
        let health = client.fetch_health().await;
        assert!(matches!(health, Err(ApiError { status: None, .. })));

        let state = load_status(&client).await;
        assert_eq!(state.status, ServiceStatus::Down);
        assert_eq!(state.message, FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn missing_message_falls_back() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/health");
            then.status(200).json_body(json!({"ok": false}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200).json_body(json!({}));
        });

        let client = HttpApiClient::new(server.base_url());
        assert_eq!(client.fetch_root().await, Ok(RootResponse::new("")));

        let state = load_status(&client).await;
        assert_eq!(state.status, ServiceStatus::Down);
        assert_eq!(state.message, FALLBACK_MESSAGE);
    }
}
