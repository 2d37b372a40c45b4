//! Fallback values applied when an environment variable is unset.

/// Environment label used when `APP_ENV` is unset.
pub const DEFAULT_APP_ENV: &str = "development";
/// Interface the API binds to when `HOST` is unset.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Port the API binds to when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 8000;
/// Tracing level used when `LOG_LEVEL` is unset.
pub use duet_telemetry::DEFAULT_LOG_LEVEL;
/// Origins allowed by CORS when `CORS_ORIGINS` is unset.
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
