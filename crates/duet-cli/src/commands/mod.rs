//! Command handlers.

pub(crate) mod dev;
pub(crate) mod status;
