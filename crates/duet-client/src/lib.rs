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

//! Client-side contract for the Duet API.
//!
//! Layout:
//! - `error.rs`: the single normalised [`ApiError`]
//! - `api.rs`: the [`StatusApi`] transport seam shared by browser and native clients
//! - `status.rs`: the one-shot reduction from two call outcomes to a [`StatusState`]
//! - `http.rs`: `reqwest` transport for native targets

pub mod api;
pub mod error;
#[cfg(not(target_arch = "wasm32"))]
pub mod http;
pub mod status;

pub use api::{Endpoint, StatusApi, decode_body, endpoint_url};
pub use error::ApiError;
#[cfg(not(target_arch = "wasm32"))]
pub use http::HttpApiClient;
pub use status::{
    EMPTY_MESSAGE_PLACEHOLDER, FALLBACK_MESSAGE, ServiceStatus, StatusState, load_status,
    load_status_with, reduce_health, reduce_root,
};
