//! Typed settings consumed by the API server and application bootstrap.

use std::fmt::{self, Display, Formatter};
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

/// Deployment environment recorded in `APP_ENV`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEnv {
    /// Local development; enables the documentation routes.
    Development,
    /// Production deployment.
    Production,
    /// Any other label (for example `staging` or `test`), kept verbatim.
    Other(String),
}

impl FromStr for AppEnv {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.to_ascii_lowercase().as_str() {
            "development" => Self::Development,
            "production" => Self::Production,
            _ => Self::Other(trimmed.to_string()),
        })
    }
}

impl AppEnv {
    /// Render the environment as its label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Other(label) => label.as_str(),
        }
    }
}

impl Display for AppEnv {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Explicit log format override taken from `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormatSetting {
    /// Structured JSON lines.
    Json,
    /// Human-readable output.
    Pretty,
}

/// Settings for the backend process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Deployment environment.
    pub app_env: AppEnv,
    /// Interface the HTTP listener binds to.
    pub host: IpAddr,
    /// Port the HTTP listener binds to.
    pub port: u16,
    /// Default tracing level when `RUST_LOG` is not provided.
    pub log_level: String,
    /// Optional log format override; inferred from the build profile when `None`.
    pub log_format: Option<LogFormatSetting>,
    /// Origins allowed to issue credentialed cross-origin requests.
    pub cors_origins: Vec<String>,
}

impl Settings {
    /// Whether the process runs in the development environment.
    #[must_use]
    pub fn is_development(&self) -> bool {
        self.app_env == AppEnv::Development
    }

    /// Whether the process runs in the production environment.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.app_env == AppEnv::Production
    }

    /// Socket address the API should listen on.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
