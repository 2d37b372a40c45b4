//! Argument parsing and command dispatch.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use reqwest::Url;
use uuid::Uuid;

use crate::client::{AppContext, CliResult, parse_url};
use crate::commands::dev::handle_dev;
use crate::commands::status::handle_status;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_API_PORT: u16 = 8000;
const DEFAULT_UI_PORT: u16 = 3000;

/// Parses CLI arguments and executes the requested command. Returns the
/// process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    match dispatch(cli).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.to_string());
            err.exit_code()
        }
    }
}

async fn dispatch(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Status(args) => {
            let trace_id = Uuid::new_v4().to_string();
            let ctx = AppContext::new(cli.api_url, cli.timeout, &trace_id)?;
            handle_status(&ctx, args.format).await
        }
        Command::Dev(args) => handle_dev(&args).await,
    }
}

#[derive(Debug, Parser)]
#[command(name = "duet-cli", about = "Developer CLI for the Duet stack")]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "DUET_API_URL",
        value_parser = parse_url,
        default_value = DEFAULT_API_URL,
        help = "Base URL of the Duet API"
    )]
    pub(crate) api_url: Url,
    #[arg(
        long,
        global = true,
        env = "DUET_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Per-request timeout in seconds"
    )]
    pub(crate) timeout: u64,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Probe `/health` and `/` and report the result.
    Status(StatusArgs),
    /// Run the backend and the UI dev server side by side.
    Dev(DevArgs),
}

#[derive(Debug, Args)]
pub(crate) struct StatusArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
}

#[derive(Debug, Args)]
pub(crate) struct DevArgs {
    #[arg(long, default_value_t = DEFAULT_API_PORT, help = "Port for the backend")]
    pub(crate) api_port: u16,
    #[arg(long, default_value_t = DEFAULT_UI_PORT, help = "Port for the UI dev server")]
    pub(crate) ui_port: u16,
    #[arg(
        long,
        default_value = ".",
        help = "Workspace root containing Cargo.toml and crates/duet-ui"
    )]
    pub(crate) workspace: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}
