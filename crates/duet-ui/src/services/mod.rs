//! Browser-side service clients.

pub mod api;

pub use api::BrowserApiClient;
