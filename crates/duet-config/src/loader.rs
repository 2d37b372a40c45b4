//! Environment-backed settings loader.
//!
//! # Design
//! - Every variable is optional; unset or blank values fall back to `defaults.rs`.
//! - Parsing goes through a lookup closure so tests never touch process-global state.

use std::net::IpAddr;

use crate::defaults::{
    DEFAULT_APP_ENV, DEFAULT_CORS_ORIGINS, DEFAULT_HOST, DEFAULT_LOG_LEVEL, DEFAULT_PORT,
};
use crate::error::{ConfigError, ConfigResult};
use crate::model::{AppEnv, LogFormatSetting, Settings};

/// Environment variable names understood by the loader.
pub mod keys {
    /// Deployment environment label.
    pub const APP_ENV: &str = "APP_ENV";
    /// Bind interface.
    pub const HOST: &str = "HOST";
    /// Bind port.
    pub const PORT: &str = "PORT";
    /// Default tracing level.
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    /// Log format override.
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
    /// Comma-separated CORS origins.
    pub const CORS_ORIGINS: &str = "CORS_ORIGINS";
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] when a variable is set to a value that
    /// cannot be parsed.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] when a value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|raw| !raw.trim().is_empty());

        let Ok(app_env) = value(keys::APP_ENV)
            .as_deref()
            .unwrap_or(DEFAULT_APP_ENV)
            .parse::<AppEnv>();
        let host = parse_host(value(keys::HOST).as_deref().unwrap_or(DEFAULT_HOST))?;
        let port = value(keys::PORT)
            .as_deref()
            .map_or(Ok(DEFAULT_PORT), parse_port)?;
        let log_level = value(keys::LOG_LEVEL).map_or_else(
            || DEFAULT_LOG_LEVEL.to_string(),
            |raw| raw.trim().to_ascii_lowercase(),
        );
        let log_format = value(keys::LOG_FORMAT)
            .as_deref()
            .map(parse_log_format)
            .transpose()?;
        let cors_origins = parse_cors_origins(
            value(keys::CORS_ORIGINS)
                .as_deref()
                .unwrap_or(DEFAULT_CORS_ORIGINS),
        );

        Ok(Self {
            app_env,
            host,
            port,
            log_level,
            log_format,
            cors_origins,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_env: AppEnv::Development,
            host: IpAddr::from([127, 0, 0, 1]),
            port: DEFAULT_PORT,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: None,
            cors_origins: parse_cors_origins(DEFAULT_CORS_ORIGINS),
        }
    }
}

fn parse_host(raw: &str) -> ConfigResult<IpAddr> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::invalid(keys::HOST, raw, "not_an_ip_address"))
}

fn parse_port(raw: &str) -> ConfigResult<u16> {
    let port = raw
        .trim()
        .parse::<u16>()
        .map_err(|_| ConfigError::invalid(keys::PORT, raw, "not_a_port"))?;
    if port == 0 {
        return Err(ConfigError::invalid(keys::PORT, raw, "zero"));
    }
    Ok(port)
}

fn parse_log_format(raw: &str) -> ConfigResult<LogFormatSetting> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "json" => Ok(LogFormatSetting::Json),
        "pretty" => Ok(LogFormatSetting::Pretty),
        _ => Err(ConfigError::invalid(keys::LOG_FORMAT, raw, "unknown_format")),
    }
}

/// Split a comma-separated origin list, trimming entries and dropping blanks.
#[must_use]
pub fn parse_cors_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
