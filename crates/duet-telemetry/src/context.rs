//! Process-wide span carrying service identity.

use tracing::span::EnteredSpan;
use tracing::{Span, field};

use crate::init::build_sha;

/// Keeps the `service` span entered while it is alive.
///
/// Events emitted on the entering thread inherit `service`, `app_env` and
/// `build_sha`. Request spans live on worker threads and record `app_env`
/// themselves through [`record_app_env`].
#[must_use = "the span is exited when the guard is dropped"]
pub struct GlobalContextGuard {
    _entered: EnteredSpan,
}

impl GlobalContextGuard {
    /// Enter the `service` span for `service` running in `app_env`.
    pub fn new(service: &'static str, app_env: &str) -> Self {
        let span = tracing::info_span!(
            "service",
            service,
            app_env = %app_env,
            build_sha = %build_sha()
        );
        Self {
            _entered: span.entered(),
        }
    }
}

/// Fill the `app_env` field of the current span. No-op when the span does not
/// declare the field.
pub fn record_app_env(app_env: &str) {
    Span::current().record("app_env", field::display(app_env));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Metadata;

    fn current_span_name() -> Option<&'static str> {
        Span::current().metadata().map(Metadata::name)
    }

    #[test]
    fn guard_scopes_the_service_span() {
        tracing::subscriber::with_default(tracing_subscriber::registry(), || {
            assert_eq!(current_span_name(), None);
            {
                let _guard = GlobalContextGuard::new("duet", "development");
                assert_eq!(current_span_name(), Some("service"));
                record_app_env("production");
            }
            assert_eq!(current_span_name(), None);
        });
    }

    #[test]
    fn recording_without_a_span_is_harmless() {
        record_app_env("development");
    }
}
