//! Bootstrap failures.
//!
//! Each variant names the step that failed (`operation`) and wraps the crate
//! error that caused it. Messages are fixed strings; detail lives in `source`.

use thiserror::Error;

use duet_api::ApiServerError;
use duet_config::ConfigError;
use duet_telemetry::TelemetryError;

/// Result alias for the bootstrap sequence.
pub type AppResult<T> = Result<T, AppError>;

/// A bootstrap step that failed.
#[derive(Debug, Error)]
pub enum AppError {
    /// Settings could not be read from the environment.
    #[error("configuration operation failed")]
    Config {
        /// Step label, for example `settings.from_env`.
        operation: &'static str,
        /// Parse failure.
        source: ConfigError,
    },
    /// The tracing subscriber could not be installed.
    #[error("telemetry operation failed")]
    Telemetry {
        /// Step label.
        operation: &'static str,
        /// Installation failure.
        source: TelemetryError,
    },
    /// The API could not be built, bound, or served.
    #[error("api server operation failed")]
    ApiServer {
        /// Step label.
        operation: &'static str,
        /// Server failure.
        source: ApiServerError,
    },
}

impl AppError {
    pub(crate) const fn config(operation: &'static str, source: ConfigError) -> Self {
        Self::Config { operation, source }
    }

    pub(crate) const fn telemetry(operation: &'static str, source: TelemetryError) -> Self {
        Self::Telemetry { operation, source }
    }

    pub(crate) const fn api_server(operation: &'static str, source: ApiServerError) -> Self {
        Self::ApiServer { operation, source }
    }
}
