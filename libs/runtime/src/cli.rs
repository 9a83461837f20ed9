//! Runtime backed by an external executable.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::{ChildTracker, ContainerRuntime, RuntimeError};

/// Runtime binary used when none is configured.
pub const DEFAULT_RUNTIME_BINARY: &str = "docker";

/// Container runtime that shells out to a CLI such as `docker` or `podman`.
///
/// Output of the child is inherited, so progress bars and errors from the
/// runtime go straight to the user's terminal. Only the exit status is
/// inspected. Running processes are counted in a [`ChildTracker`].
#[derive(Debug, Clone)]
pub struct CliRuntime {
    binary: PathBuf,
    children: ChildTracker,
}

impl CliRuntime {
    /// Create a runtime that invokes `binary` (looked up on `PATH` when relative).
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            children: ChildTracker::new(),
        }
    }

    /// Count running processes in `children` instead of a private tracker.
    pub fn with_tracker(mut self, children: ChildTracker) -> Self {
        self.children = children;
        self
    }

    /// Tracker counting this runtime's running processes.
    pub fn tracker(&self) -> &ChildTracker {
        &self.children
    }

    /// The executable this runtime invokes.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Run the binary with `args` and wait for it to exit.
    ///
    /// `display` is what appears in logs and errors in place of the real
    /// argument list.
    async fn run(&self, args: &[&str], display: &str) -> Result<(), RuntimeError> {
        let binary = self.binary.display().to_string();
        let command = format!("{} {}", binary, display);
        debug!(command = %command, "Invoking container runtime");

        let Some(_running) = self.children.enter() else {
            return Err(RuntimeError::Cancelled { command });
        };
        let status = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|source| RuntimeError::Spawn {
                binary: binary.clone(),
                source,
            })?;

        if status.success() {
            return Ok(());
        }

        warn!(command = %command, exit_code = ?status.code(), "Container runtime failed");
        Err(RuntimeError::Exited {
            command,
            exit_code: status.code(),
        })
    }
}

impl Default for CliRuntime {
    fn default() -> Self {
        Self::new(DEFAULT_RUNTIME_BINARY)
    }
}

#[async_trait]
impl ContainerRuntime for CliRuntime {
    async fn login(&self, username: &str, secret: &str) -> Result<(), RuntimeError> {
        let display = format!("login -u {} -p ********", username);
        self.run(&["login", "-u", username, "-p", secret], &display)
            .await?;
        info!(username = %username, "Logged in to local runtime");
        Ok(())
    }

    async fn pull(&self, reference: &str) -> Result<(), RuntimeError> {
        self.run(&["pull", reference], &format!("pull {}", reference))
            .await?;
        info!(reference = %reference, "Pulled image");
        Ok(())
    }
}
