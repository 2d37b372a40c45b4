//! Error documents rendered by the HTTP surface.

use std::any::Any;

use axum::{
    Json,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use duet_api_models::ErrorBody;
use tracing::{debug, error};

/// Error response rendered as `{"detail": ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ApiError {
    status: StatusCode,
    detail: &'static str,
}

impl ApiError {
    pub(crate) const fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail: "Not found",
        }
    }

    pub(crate) const fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: "Internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.detail))).into_response()
    }
}

/// Fallback for paths with no registered route.
pub(crate) async fn not_found(uri: Uri) -> ApiError {
    debug!(path = %uri.path(), "no route matched");
    ApiError::not_found()
}

/// Convert a handler panic into the generic 500 document.
pub(crate) fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    error!(panic = detail, "request handler panicked");
    ApiError::internal().into_response()
}
