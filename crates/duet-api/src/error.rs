//! Failures surfaced by [`crate::ApiServer`].
//!
//! Display strings are fixed; the offending origin or address is carried in
//! fields so callers can log it structurally.

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io;
use std::net::SocketAddr;

use axum::http::header::InvalidHeaderValue;

/// Result alias for server construction and serving.
pub type ApiServerResult<T> = std::result::Result<T, ApiServerError>;

/// Why the API could not be built or stopped serving.
#[derive(Debug)]
pub enum ApiServerError {
    /// An entry of `CORS_ORIGINS` cannot be sent as an `Origin` header.
    InvalidCorsOrigin {
        /// Entry as configured.
        origin: String,
        /// Header parse failure.
        source: InvalidHeaderValue,
    },
    /// The listener could not be bound.
    Bind {
        /// Requested socket address.
        addr: SocketAddr,
        /// OS error.
        source: io::Error,
    },
    /// The accept loop exited with an error.
    Serve {
        /// OS error.
        source: io::Error,
    },
}

impl Display for ApiServerError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::InvalidCorsOrigin { .. } => "invalid cors origin",
            Self::Bind { .. } => "failed to bind api listener",
            Self::Serve { .. } => "api server terminated unexpectedly",
        };
        formatter.write_str(message)
    }
}

impl Error for ApiServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidCorsOrigin { source, .. } => Some(source),
            Self::Bind { source, .. } | Self::Serve { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn cors_error_keeps_origin_out_of_message() {
        let Err(source) = HeaderValue::from_str("http://a\r\nb") else {
            panic!("control characters must not form a header value");
        };
        let err = ApiServerError::InvalidCorsOrigin {
            origin: "http://a\r\nb".to_string(),
            source,
        };
        assert_eq!(err.to_string(), "invalid cors origin");
        assert!(err.source().is_some());
    }

    #[test]
    fn io_failures_expose_their_cause() {
        let bind = ApiServerError::Bind {
            addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            source: io::Error::from(io::ErrorKind::AddrInUse),
        };
        assert_eq!(bind.to_string(), "failed to bind api listener");
        let cause = bind
            .source()
            .and_then(|source| source.downcast_ref::<io::Error>());
        assert_eq!(cause.map(io::Error::kind), Some(io::ErrorKind::AddrInUse));

        let serve = ApiServerError::Serve {
            source: io::Error::from(io::ErrorKind::ConnectionAborted),
        };
        assert_eq!(serve.to_string(), "api server terminated unexpectedly");
    }
}
