//! One-shot reduction of the two status calls into display state.
//!
//! # Design
//! - Each outcome is reduced independently; health never affects the message and
//!   root never affects the badge.
//! - Failures are reported to the caller's sink and then swallowed; the reduced
//!   state is always renderable.

use duet_api_models::{HealthResponse, RootResponse};
use serde::Serialize;
use tracing::warn;

use crate::api::{Endpoint, StatusApi};
use crate::error::ApiError;

/// Message shown whenever the root call does not yield a greeting.
pub const FALLBACK_MESSAGE: &str = "Unable to connect to server";
/// Placeholder rendered if a resolved message is ever empty.
pub const EMPTY_MESSAGE_PLACEHOLDER: &str = "No message received";

/// Backend liveness as shown by the status badge.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ServiceStatus {
    /// Not yet known.
    #[serde(rename = "...")]
    Pending,
    /// Health call succeeded and reported `ok: true`.
    #[serde(rename = "ok")]
    Ok,
    /// Any other health outcome.
    #[serde(rename = "down")]
    Down,
}

impl ServiceStatus {
    /// Upper-cased label rendered on the badge.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "...",
            Self::Ok => "OK",
            Self::Down => "DOWN",
        }
    }

    /// Whether the badge should use the healthy styling.
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// View state for the status page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusState {
    /// Badge value.
    pub status: ServiceStatus,
    /// Greeting or fallback text.
    pub message: String,
    /// True until both calls have settled.
    pub loading: bool,
}

impl StatusState {
    /// State immediately after mount.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            status: ServiceStatus::Pending,
            message: String::new(),
            loading: true,
        }
    }

    /// Resolve both outcomes into the final state.
    #[must_use]
    pub fn resolve(
        health: Result<HealthResponse, ApiError>,
        root: Result<RootResponse, ApiError>,
    ) -> Self {
        Self {
            status: reduce_health(&health),
            message: reduce_root(root),
            loading: false,
        }
    }

    /// Text for the badge, honouring the loading indicator.
    #[must_use]
    pub const fn badge_text(&self) -> &'static str {
        if self.loading {
            "Checking..."
        } else {
            self.status.label()
        }
    }

    /// Text for the message panel once loading has finished.
    #[must_use]
    pub fn message_text(&self) -> &str {
        if self.message.is_empty() {
            EMPTY_MESSAGE_PLACEHOLDER
        } else {
            &self.message
        }
    }
}

/// Map a health outcome to the badge value.
#[must_use]
pub const fn reduce_health(outcome: &Result<HealthResponse, ApiError>) -> ServiceStatus {
    match outcome {
        Ok(HealthResponse { ok: true }) => ServiceStatus::Ok,
        Ok(HealthResponse { ok: false }) | Err(_) => ServiceStatus::Down,
    }
}

/// Map a root outcome to the panel message. Blank greetings count as failures.
#[must_use]
pub fn reduce_root(outcome: Result<RootResponse, ApiError>) -> String {
    match outcome {
        Ok(RootResponse { message }) if !message.trim().is_empty() => message,
        Ok(_) | Err(_) => FALLBACK_MESSAGE.to_string(),
    }
}

/// Issue both calls concurrently and resolve once both settle, logging failures
/// through `tracing`.
pub async fn load_status<A>(api: &A) -> StatusState
where
    A: StatusApi + ?Sized,
{
    load_status_with(api, |endpoint, err| {
        warn!(
            endpoint = endpoint.as_str(),
            status = ?err.status,
            error = %err,
            "status request failed"
        );
    })
    .await
}

/// Issue both calls concurrently and resolve once both settle, passing each
/// failure to `report` before it is folded into the fallback values.
pub async fn load_status_with<A, R>(api: &A, report: R) -> StatusState
where
    A: StatusApi + ?Sized,
    R: Fn(Endpoint, &ApiError),
{
    let (health, root) = futures_util::join!(api.fetch_health(), api.fetch_root());
    if let Err(err) = &health {
        report(Endpoint::Health, err);
    }
    if let Err(err) = &root {
        report(Endpoint::Root, err);
    }
    StatusState::resolve(health, root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::pin::pin;
    use std::task::Poll;
    use tokio::sync::oneshot;

    struct FixedApi {
        health: Result<HealthResponse, ApiError>,
        root: Result<RootResponse, ApiError>,
    }

    #[async_trait(?Send)]
    impl StatusApi for FixedApi {
        async fn fetch_health(&self) -> Result<HealthResponse, ApiError> {
            self.health.clone()
        }

        async fn fetch_root(&self) -> Result<RootResponse, ApiError> {
            self.root.clone()
        }
    }

    type Gate<T> = RefCell<Option<oneshot::Receiver<Result<T, ApiError>>>>;

    struct GatedApi {
        health: Gate<HealthResponse>,
        root: Gate<RootResponse>,
    }

    async fn open<T>(gate: &Gate<T>) -> Result<T, ApiError> {
        let receiver = gate
            .borrow_mut()
            .take()
            .ok_or_else(|| ApiError::transport("gate already consumed"))?;
        receiver
            .await
            .map_err(|_| ApiError::transport("gate dropped"))?
    }

    #[async_trait(?Send)]
    impl StatusApi for GatedApi {
        async fn fetch_health(&self) -> Result<HealthResponse, ApiError> {
            open(&self.health).await
        }

        async fn fetch_root(&self) -> Result<RootResponse, ApiError> {
            open(&self.root).await
        }
    }

    #[test]
    fn initial_state_is_loading() {
        let state = StatusState::initial();
        assert!(state.loading);
        assert_eq!(state.status, ServiceStatus::Pending);
        assert!(state.message.is_empty());
        assert_eq!(state.badge_text(), "Checking...");
    }

    #[test]
    fn health_reduction_covers_every_outcome() {
        assert_eq!(
            reduce_health(&Ok(HealthResponse { ok: true })),
            ServiceStatus::Ok
        );
        assert_eq!(
            reduce_health(&Ok(HealthResponse { ok: false })),
            ServiceStatus::Down
        );
        assert_eq!(
            reduce_health(&Err(ApiError::http(500, None))),
            ServiceStatus::Down
        );
        assert_eq!(
            reduce_health(&Err(ApiError::transport("refused"))),
            ServiceStatus::Down
        );
    }

    #[test]
    fn root_reduction_never_yields_empty_text() {
        assert_eq!(reduce_root(Ok(RootResponse::new("hello"))), "hello");
        assert_eq!(reduce_root(Ok(RootResponse::new(""))), FALLBACK_MESSAGE);
        assert_eq!(reduce_root(Ok(RootResponse::new("  "))), FALLBACK_MESSAGE);
        assert_eq!(
            reduce_root(Err(ApiError::http(404, None))),
            FALLBACK_MESSAGE
        );
    }

    #[test]
    fn resolved_state_renders_labels() {
        let state = StatusState::resolve(
            Ok(HealthResponse::ok()),
            Ok(RootResponse::new("the server is now active")),
        );
        assert!(!state.loading);
        assert_eq!(state.badge_text(), "OK");
        assert!(state.status.is_ok());
        assert_eq!(state.message_text(), "the server is now active");

        let empty = StatusState {
            status: ServiceStatus::Down,
            message: String::new(),
            loading: false,
        };
        assert_eq!(empty.badge_text(), "DOWN");
        assert!(!empty.status.is_ok());
        assert_eq!(empty.message_text(), EMPTY_MESSAGE_PLACEHOLDER);
    }

    #[test]
    fn status_serializes_with_raw_labels() -> Result<(), serde_json::Error> {
        let state = StatusState::resolve(Err(ApiError::transport("x")), Ok(RootResponse::new("m")));
        assert_eq!(
            serde_json::to_value(&state)?,
            serde_json::json!({"status": "down", "message": "m", "loading": false})
        );
        assert_eq!(
            serde_json::to_value(StatusState::initial().status)?,
            serde_json::json!("...")
        );
        Ok(())
    }

    #[tokio::test]
    async fn failures_are_reported_and_folded() {
        let api = FixedApi {
            health: Err(ApiError::http(500, None)),
            root: Err(ApiError::http(404, Some("Not found".into()))),
        };
        let reported = RefCell::new(Vec::new());
        let state = load_status_with(&api, |endpoint, err| {
            reported.borrow_mut().push((endpoint, err.status));
        })
        .await;

        assert_eq!(state.status, ServiceStatus::Down);
        assert_eq!(state.message, FALLBACK_MESSAGE);
        assert_eq!(
            reported.into_inner(),
            vec![(Endpoint::Health, Some(500)), (Endpoint::Root, Some(404))]
        );
    }

    #[tokio::test]
    async fn successful_calls_report_nothing() {
        let api = FixedApi {
            health: Ok(HealthResponse::ok()),
            root: Ok(RootResponse::new("X")),
        };
        let reported = RefCell::new(0_u32);
        let state = load_status_with(&api, |_, _| *reported.borrow_mut() += 1).await;
        assert_eq!(state.status.label(), "OK");
        assert_eq!(state.message, "X");
        assert_eq!(reported.into_inner(), 0);
    }

    #[tokio::test]
    async fn resolves_once_both_settle_in_either_order() {
        for root_first in [true, false] {
            let (health_tx, health_rx) = oneshot::channel();
            let (root_tx, root_rx) = oneshot::channel();
            let api = GatedApi {
                health: RefCell::new(Some(health_rx)),
                root: RefCell::new(Some(root_rx)),
            };

            let mut load = pin!(load_status(&api));
            assert!(matches!(futures_util::poll!(load.as_mut()), Poll::Pending));

            if root_first {
                assert!(root_tx.send(Ok(RootResponse::new("late"))).is_ok());
            } else {
                assert!(health_tx.send(Ok(HealthResponse::ok())).is_ok());
                assert!(matches!(futures_util::poll!(load.as_mut()), Poll::Pending));
                assert!(root_tx.send(Ok(RootResponse::new("late"))).is_ok());
                let state = load.await;
                assert!(!state.loading);
                assert_eq!(state.status, ServiceStatus::Ok);
                assert_eq!(state.message, "late");
                continue;
            }

            assert!(matches!(futures_util::poll!(load.as_mut()), Poll::Pending));
            assert!(health_tx.send(Ok(HealthResponse { ok: false })).is_ok());
            let state = load.await;
            assert!(!state.loading);
            assert_eq!(state.status, ServiceStatus::Down);
            assert_eq!(state.message, "late");
        }
    }
}
