//! Local development launcher.
//!
//! # Design
//! - Starts the backend (`cargo run -p duet-app`) and the UI dev server (`trunk serve`)
//!   as child processes; a server whose port is already taken is skipped.
//! - Runs until Ctrl+C/SIGTERM or until either child exits, then stops the rest.
//! - Children are sent SIGTERM and get a grace period to exit before being killed.

use std::future::Future;
use std::io;
use std::net::{Ipv4Addr, TcpListener};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use anyhow::anyhow;
use duet_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging};
use futures_util::future::{join_all, select_all};
use tokio::process::{Child, Command};
use tokio::signal;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::cli::DevArgs;
use crate::client::{CliError, CliResult};

const GRACE_PERIOD: Duration = Duration::from_secs(2);
const UI_CRATE_DIR: &str = "crates/duet-ui";

/// A dev server the launcher knows how to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DevServer {
    pub(crate) name: &'static str,
    pub(crate) port: u16,
    pub(crate) program: &'static str,
    pub(crate) args: Vec<String>,
    pub(crate) env: Vec<(&'static str, String)>,
    pub(crate) current_dir: PathBuf,
}

impl DevServer {
    fn backend(workspace: &Path, port: u16) -> Self {
        Self {
            name: "backend",
            port,
            program: "cargo",
            args: vec!["run".into(), "-p".into(), "duet-app".into()],
            env: vec![("PORT", port.to_string())],
            current_dir: workspace.to_path_buf(),
        }
    }

    fn frontend(workspace: &Path, port: u16) -> Self {
        Self {
            name: "frontend",
            port,
            program: "trunk",
            args: vec!["serve".into(), "--port".into(), port.to_string()],
            env: Vec::new(),
            current_dir: workspace.join(UI_CRATE_DIR),
        }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(self.program);
        command
            .args(&self.args)
            .envs(self.env.iter().map(|(key, value)| (*key, value.as_str())))
            .current_dir(&self.current_dir)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        command
    }
}

/// A spawned dev server.
pub(crate) struct Running {
    pub(crate) name: &'static str,
    pub(crate) child: Child,
}

pub(crate) async fn handle_dev(args: &DevArgs) -> CliResult<()> {
    validate(args)?;
    let logging = LoggingConfig {
        level: DEFAULT_LOG_LEVEL,
        format: LogFormat::Pretty,
        build_sha: "dev",
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err}");
    }

    let planned = plan_servers(args, port_is_free);
    if planned.is_empty() {
        return Err(CliError::failure(anyhow!(
            "no dev server could be started: ports {} and {} are in use",
            args.api_port,
            args.ui_port
        )));
    }

    let mut running = Vec::with_capacity(planned.len());
    for server in planned {
        match server.command().spawn() {
            Ok(child) => {
                info!(
                    server = server.name,
                    url = %format!("http://localhost:{}", server.port),
                    "dev server started"
                );
                running.push(Running {
                    name: server.name,
                    child,
                });
            }
            Err(err) => error!(
                server = server.name,
                program = server.program,
                error = %err,
                "failed to start dev server"
            ),
        }
    }
    if running.is_empty() {
        return Err(CliError::failure(anyhow!("no dev server could be started")));
    }

    info!("press Ctrl+C to stop");
    supervise(running, wait_for_signal()).await
}

fn validate(args: &DevArgs) -> CliResult<()> {
    if args.api_port == args.ui_port {
        return Err(CliError::validation(format!(
            "--api-port and --ui-port must differ (both are {})",
            args.api_port
        )));
    }
    if !args.workspace.join("Cargo.toml").is_file() {
        return Err(CliError::validation(format!(
            "{} is not the workspace root (no Cargo.toml found)",
            args.workspace.display()
        )));
    }
    Ok(())
}

/// Servers to start, skipping any whose port is already bound.
pub(crate) fn plan_servers(args: &DevArgs, is_free: impl Fn(u16) -> bool) -> Vec<DevServer> {
    [
        DevServer::backend(&args.workspace, args.api_port),
        DevServer::frontend(&args.workspace, args.ui_port),
    ]
    .into_iter()
    .filter(|server| {
        let free = is_free(server.port);
        if !free {
            warn!(
                server = server.name,
                port = server.port,
                "port is already in use, skipping"
            );
        }
        free
    })
    .collect()
}

pub(crate) fn port_is_free(port: u16) -> bool {
    TcpListener::bind((Ipv4Addr::LOCALHOST, port)).is_ok()
}

/// Wait for `shutdown` or the first child exit, then stop every remaining child.
pub(crate) async fn supervise<F>(mut running: Vec<Running>, shutdown: F) -> CliResult<()>
where
    F: Future<Output = &'static str>,
{
    let outcome = tokio::select! {
        received = shutdown => {
            info!(signal = received, "stopping dev servers");
            Ok(())
        }
        (name, status) = first_exit(&mut running) => match status {
            Ok(status) if status.success() => {
                warn!(server = name, "dev server exited, stopping the rest");
                Ok(())
            }
            Ok(status) => Err(CliError::failure(anyhow!("{name} exited with {status}"))),
            Err(err) => Err(CliError::failure(anyhow!("failed to wait for {name}: {err}"))),
        },
    };
    join_all(running.iter_mut().map(terminate)).await;
    outcome
}

async fn first_exit(running: &mut [Running]) -> (&'static str, io::Result<ExitStatus>) {
    if running.is_empty() {
        return std::future::pending().await;
    }
    let waits = running
        .iter_mut()
        .map(|server| Box::pin(async move { (server.name, server.child.wait().await) }));
    let (outcome, _, _) = select_all(waits).await;
    outcome
}

async fn terminate(server: &mut Running) {
    if matches!(server.child.try_wait(), Ok(Some(_))) {
        return;
    }
    request_stop(server);
    if timeout(GRACE_PERIOD, server.child.wait()).await.is_ok() {
        info!(server = server.name, "dev server stopped");
        return;
    }
    match server.child.kill().await {
        Ok(()) => info!(server = server.name, "dev server killed"),
        Err(err) => warn!(server = server.name, error = %err, "failed to kill dev server"),
    }
}

/// Ask the child to shut down gracefully.
#[cfg(unix)]
fn request_stop(server: &Running) {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    let Some(pid) = server.child.id().and_then(|id| i32::try_from(id).ok()) else {
        return;
    };
    if let Err(err) = kill(Pid::from_raw(pid), Signal::SIGTERM) {
        warn!(server = server.name, error = %err, "failed to send SIGTERM");
    }
}

#[cfg(not(unix))]
const fn request_stop(_server: &Running) {}

/// Resolve with the name of the first termination signal received.
async fn wait_for_signal() -> &'static str {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => "SIGINT",
        () = sigterm => "SIGTERM",
    }
}
