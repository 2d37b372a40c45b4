//! Output renderers for CLI commands.

use anyhow::anyhow;
use duet_client::StatusState;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

pub(crate) fn render_status(state: &StatusState, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(state)
            .map_err(|err| CliError::failure(anyhow!(err).context("failed to format JSON"))),
        OutputFormat::Table => Ok(format!(
            "status:  {}\nmessage: {}",
            state.badge_text(),
            state.message_text()
        )),
    }
}
