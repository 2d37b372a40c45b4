//! Greeting and liveness endpoints.

use std::sync::Arc;

use axum::{Json, extract::State};
use duet_api_models::{HealthResponse, ROOT_MESSAGE, RootResponse};
use duet_telemetry::record_app_env;
use tracing::{debug, info};

use crate::state::ApiState;

pub(crate) async fn root(State(state): State<Arc<ApiState>>) -> Json<RootResponse> {
    record_app_env(state.app_env.as_str());
    info!("root endpoint called");
    Json(RootResponse::new(ROOT_MESSAGE))
}

pub(crate) async fn health(State(state): State<Arc<ApiState>>) -> Json<HealthResponse> {
    record_app_env(state.app_env.as_str());
    debug!("health check");
    Json(HealthResponse::ok())
}
