//! Error types for registry operations.

use hubpull_runtime::RuntimeError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors from talking to the registry or acting on its responses.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Required configuration is missing.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The login call was rejected or returned no usable token.
    #[error("authentication failed: {message}")]
    Auth {
        status: Option<u16>,
        message: String,
    },

    /// A listing call returned a non-200 status.
    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The request did not complete within the configured deadline.
    #[error("request to registry timed out")]
    Timeout,

    /// Transport failure (DNS, TLS, connection reset, ...).
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The local container runtime failed.
    #[error("container runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

impl RegistryError {
    /// Classify a transport error, separating out timeouts.
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RegistryError::Timeout
        } else {
            RegistryError::Network(err)
        }
    }

    /// HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            RegistryError::Auth { status, .. } => *status,
            RegistryError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
