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
#![allow(clippy::module_name_repetitions)]

//! HTTP API for the Duet backend.
//!
//! Layout:
//! - `http/router.rs`: [`ApiServer`] construction, middleware stack, and serve loop
//! - `http/health.rs`: greeting and liveness handlers
//! - `http/errors.rs`: `{"detail": ...}` documents, route fallback, panic recovery
//! - `http/docs.rs`: development-only `OpenAPI` route
//! - `openapi.rs`: the `OpenAPI` document itself

pub mod error;
pub mod http;
pub mod openapi;
mod state;

pub use error::{ApiServerError, ApiServerResult};
pub use http::router::ApiServer;
pub use openapi::openapi_document;
