//! In-memory runtime for tests and dry runs.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::{ContainerRuntime, RuntimeError};

/// A call recorded by [`MockRuntime`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCall {
    Login { username: String },
    Pull { reference: String },
}

/// Runtime that records calls instead of running anything.
#[derive(Debug, Default)]
pub struct MockRuntime {
    calls: Mutex<Vec<RuntimeCall>>,

    /// Exit code every call fails with, if set.
    fail_with: Option<i32>,
}

impl MockRuntime {
    /// Create a mock runtime where every call succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock runtime where every call exits with `exit_code`.
    pub fn failing(exit_code: i32) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_with: Some(exit_code),
        }
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> Vec<RuntimeCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// References passed to `pull`, in order.
    pub fn pulled(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RuntimeCall::Pull { reference } => Some(reference),
                RuntimeCall::Login { .. } => None,
            })
            .collect()
    }

    fn record(&self, call: RuntimeCall, command: String) -> Result<(), RuntimeError> {
        debug!(?call, "Mock runtime call");
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }

        match self.fail_with {
            Some(code) => Err(RuntimeError::Exited {
                command,
                exit_code: Some(code),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ContainerRuntime for MockRuntime {
    async fn login(&self, username: &str, _secret: &str) -> Result<(), RuntimeError> {
        self.record(
            RuntimeCall::Login {
                username: username.to_string(),
            },
            format!("mock login -u {}", username),
        )
    }

    async fn pull(&self, reference: &str) -> Result<(), RuntimeError> {
        self.record(
            RuntimeCall::Pull {
                reference: reference.to_string(),
            },
            format!("mock pull {}", reference),
        )
    }
}
