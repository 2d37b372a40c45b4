//! Router construction and server host for the API.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Request},
    routing::get,
};
use duet_api_models::{API_PREFIX, HEALTH_PATH, ROOT_PATH};
use duet_config::{AppEnv, Settings};
use duet_telemetry::{
    HEADER_REQUEST_ID, build_sha, propagate_request_id_layer, set_request_id_layer,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{Span, info};

use crate::error::{ApiServerError, ApiServerResult};
use crate::http::docs::openapi_document_handler;
use crate::http::errors::{handle_panic, not_found};
use crate::http::health::{health, root};
use crate::openapi::openapi_document;
use crate::state::ApiState;

/// Origin entry that mirrors whatever origin the request presents.
const MIRROR_ANY_ORIGIN: &str = "*";

/// Axum router wrapper that hosts the Duet API.
pub struct ApiServer {
    router: Router,
    app_env: AppEnv,
}

impl ApiServer {
    /// Build the router for the supplied settings.
    ///
    /// The documentation route is only mounted in development.
    ///
    /// # Errors
    ///
    /// Returns [`ApiServerError::InvalidCorsOrigin`] when a configured origin is not a
    /// valid header value.
    pub fn new(settings: &Settings) -> ApiServerResult<Self> {
        let state = Arc::new(ApiState::new(
            settings.app_env.clone(),
            Arc::new(openapi_document()),
        ));
        let routes = Self::build_router(settings.is_development()).with_state(state);
        Self::with_routes(routes, settings)
    }

    fn with_routes(routes: Router, settings: &Settings) -> ApiServerResult<Self> {
        let cors_layer = cors_layer(&settings.cors_origins)?;
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(HEADER_REQUEST_ID)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("");
                tracing::info_span!(
                    "http.request",
                    method = %request.method(),
                    route = %request.uri().path(),
                    request_id = %request_id,
                    app_env = tracing::field::Empty,
                    build_sha = %build_sha(),
                    status_code = tracing::field::Empty,
                    latency_ms = tracing::field::Empty
                )
            })
            .on_request(|_request: &Request<Body>, _span: &Span| {})
            .on_response(
                |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                    span.record("status_code", response.status().as_u16());
                    let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
                    span.record("latency_ms", latency_ms);
                },
            );
        let layered = ServiceBuilder::new()
            .layer(set_request_id_layer())
            .layer(propagate_request_id_layer())
            .layer(trace_layer)
            .layer(cors_layer)
            .layer(CatchPanicLayer::custom(handle_panic));

        let router = routes.fallback(not_found).layer(layered);
        Ok(Self {
            router,
            app_env: settings.app_env.clone(),
        })
    }

    fn build_router(include_docs: bool) -> Router<Arc<ApiState>> {
        let prefixed_root = format!("{API_PREFIX}{ROOT_PATH}");
        let prefixed_health = format!("{API_PREFIX}{HEALTH_PATH}");
        let router = Router::new()
            .route(ROOT_PATH, get(root))
            .route(HEALTH_PATH, get(health))
            .route(&prefixed_root, get(root))
            .route(&prefixed_health, get(health));
        if include_docs {
            router.route("/docs/openapi.json", get(openapi_document_handler))
        } else {
            router
        }
    }

    /// Serve the API on `addr` until `shutdown` resolves, then drain in-flight
    /// requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener fails to bind or the server terminates
    /// unexpectedly.
    pub async fn serve<F>(self, addr: SocketAddr, shutdown: F) -> ApiServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ApiServerError::Bind { addr, source })?;
        let local_addr = listener.local_addr().unwrap_or(addr);
        info!(
            app_env = %self.app_env,
            addr = %local_addr,
            "starting api"
        );
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|source| ApiServerError::Serve { source })?;
        info!("api stopped");
        Ok(())
    }

    #[cfg(test)]
    pub(crate) const fn router(&self) -> &Router {
        &self.router
    }
}

/// Credentialed CORS for the configured origins; request methods and headers are
/// mirrored back.
fn cors_layer(origins: &[String]) -> ApiServerResult<CorsLayer> {
    let allow_origin = if origins.iter().any(|origin| origin == MIRROR_ANY_ORIGIN) {
        AllowOrigin::mirror_request()
    } else {
        let values = origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|source| ApiServerError::InvalidCorsOrigin {
                    origin: origin.clone(),
                    source,
                })
            })
            .collect::<ApiServerResult<Vec<_>>>()?;
        AllowOrigin::list(values)
    };
    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}
