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

//! Telemetry primitives shared across the Duet workspace.
//!
//! This crate centralises logging setup and request-correlation helpers so the
//! API server, application bootstrap, and CLI share one observability story.

pub mod context;
pub mod error;
pub mod init;
pub mod layers;

pub use context::{GlobalContextGuard, record_app_env};
pub use error::{Result, TelemetryError};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
pub use layers::{HEADER_REQUEST_ID, propagate_request_id_layer, set_request_id_layer};
