//! Normalised client error.

use thiserror::Error;

/// Single error kind for every failed API call.
///
/// `status` is set when the server answered with a non-success HTTP status and
/// left empty for transport failures (DNS, refused connection, timeout) and for
/// bodies that could not be decoded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    /// HTTP status returned by the server, if any.
    pub status: Option<u16>,
    /// Human-readable description of the failure.
    pub message: String,
}

impl ApiError {
    /// Failure before an HTTP response was received.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    /// Non-success HTTP response. Falls back to a generic message when the server
    /// did not provide a detail.
    #[must_use]
    pub fn http(status: u16, detail: Option<String>) -> Self {
        Self {
            status: Some(status),
            message: detail
                .filter(|detail| !detail.trim().is_empty())
                .unwrap_or_else(|| format!("request failed with status code {status}")),
        }
    }

    /// Success response whose body did not match the expected shape.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: format!("invalid response body: {}", message.into()),
        }
    }
}
