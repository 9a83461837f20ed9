//! hubpull - list Docker Hub repositories and pull their latest images.
//!
//! Credentials come from `--username`/`--api-key` or `DOCKERHUB_USER_NAME`/
//! `DOCKERHUB_API_KEY`. See `hubpull --help`.

use std::future::Future;

use anyhow::Result;
use clap::Parser;
use hubpull_runtime::ChildTracker;
use tracing::warn;

mod commands;
mod config;
mod error;
mod logging;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_json);

    let children = ChildTracker::new();
    let result = drive(cli.run(children.clone()), &children, shutdown_signal()).await;

    if let Err(e) = result {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}

/// Run `command` until it finishes or `interrupt` fires.
///
/// After an interrupt no new runtime process is started. In-flight registry
/// calls are dropped at once, but a runtime process that is already running
/// is waited for.
async fn drive<C, I>(command: C, children: &ChildTracker, interrupt: I) -> Result<()>
where
    C: Future<Output = Result<()>>,
    I: Future<Output = ()>,
{
    tokio::pin!(command);

    tokio::select! {
        result = &mut command => return result,
        _ = interrupt => {}
    }

    children.close();
    if !children.is_idle() {
        warn!(
            running = children.running(),
            "Interrupted, waiting for the container runtime to exit"
        );
        tokio::select! {
            biased;
            result = &mut command => return result,
            _ = children.wait_idle() => {}
        }
    }

    Err(error::CliError::Interrupted.into())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
