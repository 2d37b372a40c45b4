#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the Duet public API.
//!
//! The server renders these types and both clients (browser UI and CLI) decode
//! them, so the wire contract lives in exactly one place.
use serde::{Deserialize, Serialize};

/// Path of the liveness probe.
pub const HEALTH_PATH: &str = "/health";
/// Path of the informational root endpoint.
pub const ROOT_PATH: &str = "/";
/// Prefix under which the same endpoints are mounted for the dev proxy.
pub const API_PREFIX: &str = "/api";
/// Greeting returned by the root endpoint.
pub const ROOT_MESSAGE: &str = "the server is now active";

/// Liveness flag returned by `GET /health`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    /// Whether the backend considers itself ready.
    pub ok: bool,
}

impl HealthResponse {
    /// Healthy response.
    #[must_use]
    pub const fn ok() -> Self {
        Self { ok: true }
    }
}

/// Greeting returned by `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RootResponse {
    /// Greeting text. Absent fields decode as an empty string.
    #[serde(default)]
    pub message: String,
}

impl RootResponse {
    /// Build a root response carrying the supplied message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error document rendered for unknown routes and internal failures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Short, human-readable description.
    pub detail: String,
}

impl ErrorBody {
    /// Build an error document with the supplied detail.
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn root_response_tolerates_missing_message() -> Result<(), serde_json::Error> {
        let decoded: RootResponse = serde_json::from_value(json!({"error": "nope"}))?;
        assert!(decoded.message.is_empty());
        Ok(())
    }

    #[test]
    fn health_response_requires_ok_flag() {
        assert!(serde_json::from_value::<HealthResponse>(json!({})).is_err());
        assert!(serde_json::from_value::<HealthResponse>(json!({"ok": "yes"})).is_err());
    }

    #[test]
    fn wire_shapes_match_contract() -> Result<(), serde_json::Error> {
        assert_eq!(
            serde_json::to_value(HealthResponse::ok())?,
            json!({"ok": true})
        );
        assert_eq!(
            serde_json::to_value(RootResponse::new(ROOT_MESSAGE))?,
            json!({"message": "the server is now active"})
        );
        assert_eq!(
            serde_json::to_value(ErrorBody::new("Not found"))?,
            json!({"detail": "Not found"})
        );
        Ok(())
    }
}
