//! Boot sequence: settings, logging, API server, graceful shutdown.

use std::future::Future;

use duet_api::ApiServer;
use duet_config::{LogFormatSetting, Settings};
use duet_telemetry::{GlobalContextGuard, LogFormat, LoggingConfig, init_logging};
use tokio::signal;
use tracing::info;

use crate::error::{AppError, AppResult};

/// Service label attached to the process span.
const SERVICE_NAME: &str = "duet";

/// Build identifier baked in at compile time, `dev` for local builds.
const BUILD_SHA: &str = match option_env!("DUET_BUILD_SHA") {
    Some(sha) => sha,
    None => "dev",
};

/// Entry point for the backend boot sequence.
///
/// # Errors
///
/// Returns an error if settings are invalid, logging cannot be installed, or the
/// API server fails to bind or serve.
pub async fn run_app() -> AppResult<()> {
    let settings =
        Settings::from_env().map_err(|err| AppError::config("settings.from_env", err))?;
    init_logging(&logging_config(&settings))
        .map_err(|err| AppError::telemetry("telemetry.init", err))?;
    let _context = GlobalContextGuard::new(SERVICE_NAME, settings.app_env.as_str());

    info!(
        app_env = %settings.app_env,
        log_level = %settings.log_level,
        cors_origins = ?settings.cors_origins,
        "Duet backend starting"
    );
    serve_until(&settings, shutdown_signal()).await
}

/// Build and serve the API until `shutdown` resolves.
pub(crate) async fn serve_until<F>(settings: &Settings, shutdown: F) -> AppResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let api =
        ApiServer::new(settings).map_err(|err| AppError::api_server("api_server.new", err))?;
    api.serve(settings.bind_addr(), shutdown)
        .await
        .map_err(|err| AppError::api_server("api_server.serve", err))?;
    info!("Duet backend shutdown complete");
    Ok(())
}

/// Map loaded settings onto the telemetry logging configuration.
pub(crate) fn logging_config(settings: &Settings) -> LoggingConfig<'_> {
    let format = match settings.log_format {
        Some(LogFormatSetting::Json) => LogFormat::Json,
        Some(LogFormatSetting::Pretty) => LogFormat::Pretty,
        None => LogFormat::infer(),
    };
    LoggingConfig {
        level: &settings.log_level,
        format,
        build_sha: BUILD_SHA,
    }
}

/// Resolve on SIGINT or SIGTERM. A handler that cannot be installed never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received SIGINT, starting graceful shutdown"),
        () = terminate => info!("received SIGTERM, starting graceful shutdown"),
    }
}
