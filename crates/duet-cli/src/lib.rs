#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::redundant_pub_crate)]

//! Developer CLI for a local Duet stack.
//!
//! Layout:
//! - `cli.rs`: argument parsing and command dispatch
//! - `commands/`: `status` probe and `dev` launcher
//! - `client.rs`: shared HTTP client and error types
//! - `output.rs`: renderers for the status report
//! - `main.rs`: thin entrypoint delegating to `run()`

pub(crate) mod cli;
pub(crate) mod client;
pub(crate) mod commands;
pub(crate) mod output;

pub use cli::run;
