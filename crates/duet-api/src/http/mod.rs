//! HTTP surface modules (router, handlers, error documents).

/// `OpenAPI` document publishing.
pub mod docs;
/// Error documents, route fallback, and panic recovery.
pub mod errors;
/// Greeting and liveness endpoints.
pub mod health;
/// Router construction and server host.
pub mod router;
