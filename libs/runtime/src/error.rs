//! Error types for runtime invocation.

use std::io;

use thiserror::Error;

/// Errors from invoking the container runtime.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The runtime executable could not be started.
    #[error("failed to start `{binary}`: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: io::Error,
    },

    /// The runtime exited unsuccessfully.
    #[error("`{command}` failed: {}", describe_exit(.exit_code))]
    Exited {
        command: String,
        exit_code: Option<i32>,
    },

    /// The runtime was not started because shutdown is in progress.
    #[error("`{command}` not started: shutting down")]
    Cancelled { command: String },
}

impl RuntimeError {
    /// Exit code of the failed process, if it exited with one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            RuntimeError::Spawn { .. } | RuntimeError::Cancelled { .. } => None,
            RuntimeError::Exited { exit_code, .. } => *exit_code,
        }
    }
}

fn describe_exit(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}
