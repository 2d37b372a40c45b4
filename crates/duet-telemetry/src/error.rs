//! Telemetry failures.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;

/// Result alias for telemetry operations.
pub type Result<T> = std::result::Result<T, TelemetryError>;

/// Why logging could not be set up.
#[derive(Debug)]
pub enum TelemetryError {
    /// The configured level is not a valid `EnvFilter` directive.
    InvalidFilter {
        /// Directive as configured.
        directive: String,
        /// Parser diagnostic.
        source: ParseError,
    },
    /// Another global subscriber is already installed.
    SubscriberInstall {
        /// Underlying tracing subscriber error.
        source: TryInitError,
    },
}

impl Display for TelemetryError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFilter { directive, .. } => {
                write!(formatter, "invalid log filter directive `{directive}`")
            }
            Self::SubscriberInstall { .. } => {
                formatter.write_str("failed to install tracing subscriber")
            }
        }
    }
}

impl Error for TelemetryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidFilter { source, .. } => Some(source),
            Self::SubscriberInstall { source } => Some(source),
        }
    }
}
