use duet_client::{HttpApiClient, load_status_with};

use crate::cli::OutputFormat;
use crate::client::{AppContext, CliError, CliResult};
use crate::output::render_status;

pub(crate) async fn handle_status(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let api = HttpApiClient::with_client(ctx.client.clone(), ctx.base_url.as_str());
    let state = load_status_with(&api, |endpoint, err| {
        eprintln!("warning: {} request failed: {err}", endpoint.as_str());
    })
    .await;

    println!("{}", render_status(&state, format)?);

    if state.status.is_ok() {
        Ok(())
    } else {
        Err(CliError::Unhealthy {
            base_url: api.base_url().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use httpmock::prelude::*;
    use reqwest::Client;
    use serde_json::json;

    fn context_for(base_url: &str) -> Result<AppContext> {
        Ok(AppContext {
            client: Client::new(),
            base_url: base_url.parse()?,
        })
    }

    #[tokio::test]
    async fn healthy_backend_exits_successfully() -> Result<()> {
        let server = MockServer::start_async().await;
        let health = server.mock(|when, then| {
            when.method(GET).path("/health");
            then.status(200).json_body(json!({"ok": true}));
        });
        let root = server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200)
                .json_body(json!({"message": "the server is now active"}));
        });

        let ctx = context_for(&server.base_url())?;
        let result = handle_status(&ctx, OutputFormat::Json).await;
        assert!(result.is_ok());
        health.assert();
        root.assert();
        Ok(())
    }

    #[tokio::test]
    async fn prefixed_base_url_is_honoured() -> Result<()> {
        let server = MockServer::start_async().await;
        let health = server.mock(|when, then| {
            when.method(GET).path("/api/health");
            then.status(200).json_body(json!({"ok": true}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/");
            then.status(200).json_body(json!({"message": "hi"}));
        });

        let ctx = context_for(&format!("{}/api/", server.base_url()))?;
        assert!(handle_status(&ctx, OutputFormat::Table).await.is_ok());
        health.assert();
        Ok(())
    }

    #[tokio::test]
    async fn unhealthy_backend_is_an_operational_failure() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/health");
            then.status(200).json_body(json!({"ok": false}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(500);
        });

        let ctx = context_for(&server.base_url())?;
        match handle_status(&ctx, OutputFormat::Table).await {
            Err(err) => {
                assert!(matches!(err, CliError::Unhealthy { .. }));
                assert_eq!(err.exit_code(), 3);
            }
            Ok(()) => panic!("expected failure for unhealthy backend"),
        }
        Ok(())
    }
}
