//! Shared, read-only state handed to every handler.

use std::sync::Arc;

use duet_config::AppEnv;
use serde_json::Value;

/// Immutable request-time dependencies.
#[derive(Debug)]
pub(crate) struct ApiState {
    pub(crate) app_env: AppEnv,
    pub(crate) openapi_document: Arc<Value>,
}

impl ApiState {
    pub(crate) const fn new(app_env: AppEnv, openapi_document: Arc<Value>) -> Self {
        Self {
            app_env,
            openapi_document,
        }
    }
}
