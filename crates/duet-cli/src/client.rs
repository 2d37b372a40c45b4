//! HTTP context and error type shared by the CLI commands.

use std::time::Duration;

use anyhow::anyhow;
use duet_telemetry::HEADER_REQUEST_ID;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Url};
use thiserror::Error;

/// Command outcome that maps onto a process exit code.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// The invocation itself is wrong; nothing was attempted.
    #[error("{0}")]
    Validation(String),
    /// The backend answered but did not report itself healthy.
    #[error("backend at {base_url} is not healthy")]
    Unhealthy { base_url: String },
    /// Anything else that went wrong while running a command.
    #[error("{0:#}")]
    Failure(anyhow::Error),
}

pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    /// `2` for bad input, `3` for an unhealthy backend or a runtime failure.
    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Unhealthy { .. } | Self::Failure(_) => 3,
        }
    }
}

/// Application context passed to command handlers.
#[derive(Clone)]
pub(crate) struct AppContext {
    pub(crate) client: Client,
    pub(crate) base_url: Url,
}

impl AppContext {
    /// Build an HTTP client tagged with `trace_id` on every request.
    pub(crate) fn new(base_url: Url, timeout_secs: u64, trace_id: &str) -> CliResult<Self> {
        let mut default_headers = HeaderMap::new();
        let request_id = HeaderValue::from_str(trace_id).map_err(|_| {
            CliError::failure(anyhow!("trace identifier contains invalid characters"))
        })?;
        default_headers.insert(HEADER_REQUEST_ID, request_id);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))?;

        Ok(Self { client, base_url })
    }
}

/// Parse the API URL provided to the CLI.
pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    let url = input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!(
            "unsupported URL scheme '{other}' (expected http or https)"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn exit_codes_follow_error_kind() {
        let validation = CliError::validation("ports must differ");
        assert_eq!(validation.exit_code(), 2);
        assert_eq!(validation.to_string(), "ports must differ");

        let unhealthy = CliError::Unhealthy {
            base_url: "http://127.0.0.1:8000/".to_string(),
        };
        assert_eq!(unhealthy.exit_code(), 3);
        assert_eq!(
            unhealthy.to_string(),
            "backend at http://127.0.0.1:8000/ is not healthy"
        );

        let failure = CliError::failure(anyhow!("refused").context("failed to start"));
        assert_eq!(failure.exit_code(), 3);
        assert_eq!(failure.to_string(), "failed to start: refused");
    }

    #[test]
    fn parse_url_accepts_http_and_rejects_other_schemes() {
        assert!(parse_url("http://127.0.0.1:8000").is_ok());
        assert!(parse_url("https://duet.example/api/").is_ok());
        assert!(parse_url("not a url").is_err());
        assert!(
            parse_url("ftp://duet.example")
                .err()
                .is_some_and(|err| err.contains("unsupported URL scheme"))
        );
    }

    #[test]
    fn context_rejects_invalid_trace_identifier() {
        let base_url = Url::parse("http://127.0.0.1:8000").ok();
        let result = base_url.map(|url| AppContext::new(url, 5, "bad\nid"));
        assert!(matches!(result, Some(Err(CliError::Failure(_)))));
    }

    #[tokio::test]
    async fn context_client_sends_request_id() -> anyhow::Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/health")
                .header(HEADER_REQUEST_ID, "trace-1");
            then.status(200).json_body(serde_json::json!({"ok": true}));
        });

        let ctx = AppContext::new(server.base_url().parse()?, 5, "trace-1")
            .map_err(|err| anyhow!(err.to_string()))?;
        let response = ctx
            .client
            .get(format!("{}/health", server.base_url()))
            .send()
            .await?;
        assert!(response.status().is_success());
        mock.assert();
        Ok(())
    }
}
