//! Global subscriber installation.
//!
//! # Design
//! - One entry point installs either a JSON or a human-readable `fmt` layer.
//! - `RUST_LOG` wins over the configured level; a malformed configured level is
//!   an error rather than a silent fallback.
//! - The build SHA is captured once so every span reports the same value.

use once_cell::sync::OnceCell;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{Result, TelemetryError};

/// Level applied when neither `RUST_LOG` nor the caller provide one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

const UNKNOWN_BUILD: &str = "dev";

static BUILD_SHA: OnceCell<String> = OnceCell::new();

/// Inputs for [`init_logging`].
#[derive(Debug, Clone)]
pub struct LoggingConfig<'a> {
    /// `EnvFilter` directive, usually a bare level such as `info`.
    pub level: &'a str,
    /// Output encoding.
    pub format: LogFormat,
    /// Build identifier attached to the service span.
    pub build_sha: &'a str,
}

impl Default for LoggingConfig<'_> {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL,
            format: LogFormat::infer(),
            build_sha: UNKNOWN_BUILD,
        }
    }
}

/// Output encoding of the `fmt` layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Human-readable lines.
    Pretty,
}

impl LogFormat {
    /// Pretty for debug builds, JSON for release builds.
    #[must_use]
    pub const fn infer() -> Self {
        if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when `config.level` does not parse
/// (and `RUST_LOG` is unset), and [`TelemetryError::SubscriberInstall`] when a
/// global subscriber already exists.
pub fn init_logging(config: &LoggingConfig<'_>) -> Result<()> {
    let filter = env_filter(config.level)?;
    if BUILD_SHA.set(config.build_sha.to_string()).is_err() {
        tracing::debug!("build sha already recorded");
    }

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_target(false),
            )
            .try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().with_target(false)).try_init(),
    };
    installed.map_err(|source| TelemetryError::SubscriberInstall { source })
}

/// Build identifier captured by [`init_logging`], or `"dev"` before it runs.
#[must_use]
pub fn build_sha() -> &'static str {
    BUILD_SHA.get().map_or(UNKNOWN_BUILD, String::as_str)
}

fn env_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|source| TelemetryError::InvalidFilter {
        directive: level.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rust_log_unset() -> bool {
        std::env::var_os("RUST_LOG").is_none()
    }

    #[test]
    fn infer_follows_build_profile() {
        let expected = if cfg!(debug_assertions) {
            LogFormat::Pretty
        } else {
            LogFormat::Json
        };
        assert_eq!(LogFormat::infer(), expected);
        assert_eq!(LoggingConfig::default().level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn configured_level_must_parse() {
        if !rust_log_unset() {
            return;
        }
        assert!(env_filter("debug").is_ok());
        assert!(env_filter("duet_api=trace,warn").is_ok());
        assert!(matches!(
            env_filter("duet=loud"),
            Err(TelemetryError::InvalidFilter { directive, .. }) if directive == "duet=loud"
        ));
    }

    #[test]
    fn second_install_is_rejected() {
        let config = LoggingConfig {
            level: "info",
            format: LogFormat::Pretty,
            build_sha: "abc123",
        };
        let _ = init_logging(&config);
        assert!(matches!(
            init_logging(&config),
            Err(TelemetryError::SubscriberInstall { .. })
        ));
        assert!(!build_sha().is_empty());
    }
}
