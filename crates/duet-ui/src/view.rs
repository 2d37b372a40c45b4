//! Copy and class helpers for the status page.

use duet_client::StatusState;

/// Base URL the browser client prefixes to every endpoint path.
///
/// Defaults to `/api`, which the Trunk dev server proxies to the backend.
/// Override at build time with `DUET_API_BASE_URL`.
pub const API_BASE_URL: &str = match option_env!("DUET_API_BASE_URL") {
    Some(url) => url,
    None => "/api",
};

/// Page heading.
pub const TITLE: &str = "Rust + Axum";
/// Line under the heading.
pub const SUBTITLE: &str = "Typed full-stack development with Yew and Tokio";
/// Caption under the status badge.
pub const STATUS_CAPTION: &str = "Backend health check status";
/// Message panel text while the calls are in flight.
pub const LOADING_TEXT: &str = "Loading...";

/// A static card in the tech-stack grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    /// Single-letter badge.
    pub icon: &'static str,
    /// Card heading.
    pub title: &'static str,
    /// One-line blurb.
    pub description: &'static str,
    /// Accent class for the icon.
    pub accent: &'static str,
}

/// Cards rendered under "Tech Stack Features".
pub const FEATURES: [Feature; 3] = [
    Feature {
        icon: "Y",
        title: "Yew",
        description: "Rust components compiled to WebAssembly and served by Trunk",
        accent: "accent-blue",
    },
    Feature {
        icon: "A",
        title: "Axum",
        description: "Async HTTP API on Tokio with tracing and graceful shutdown",
        accent: "accent-green",
    },
    Feature {
        icon: "S",
        title: "Shared types",
        description: "One crate of request and response models for server and client",
        accent: "accent-purple",
    },
];

/// CSS modifier for the badge.
#[must_use]
pub const fn badge_modifier(state: &StatusState) -> &'static str {
    if state.loading {
        "pending"
    } else if state.status.is_ok() {
        "ok"
    } else {
        "down"
    }
}

/// Text for the message panel.
#[must_use]
pub fn panel_text(state: &StatusState) -> &str {
    if state.loading {
        LOADING_TEXT
    } else {
        state.message_text()
    }
}
