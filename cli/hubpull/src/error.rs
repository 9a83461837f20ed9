//! Error handling and display for the CLI.

use colored::Colorize;
use hubpull_registry::{ConfigError, RegistryError};
use hubpull_runtime::RuntimeError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid repository '{0}': expected <namespace>/<name>")]
    InvalidRepository(String),

    #[error("Repository not found: {0}")]
    NotFound(String),

    #[error("Interrupted")]
    Interrupted,
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(hint) = hint_for(err) {
        eprintln!("\n{}", hint.yellow());
    }
}

/// Suggest a fix for well-known failures.
fn hint_for(err: &anyhow::Error) -> Option<String> {
    if let Some(ConfigError::MissingSetting { name }) = err.downcast_ref::<ConfigError>() {
        return Some(missing_setting_hint(name));
    }

    if let Some(runtime_err) = err.downcast_ref::<RuntimeError>() {
        return Some(runtime_hint(runtime_err));
    }

    match err.downcast_ref::<RegistryError>()? {
        RegistryError::Config(ConfigError::MissingSetting { name }) => {
            Some(missing_setting_hint(name))
        }
        RegistryError::Auth { .. } => {
            Some("Hint: Check your username and API key (DOCKERHUB_API_KEY).".to_string())
        }
        RegistryError::Api { status: 401, .. } => {
            Some("Hint: The registry rejected the session token. Try again.".to_string())
        }
        RegistryError::Api { status: 404, .. } => {
            Some("Hint: Check the namespace and repository name.".to_string())
        }
        RegistryError::Api { status: 429, .. } => {
            Some("Hint: The registry is rate limiting requests. Wait and retry.".to_string())
        }
        RegistryError::Timeout | RegistryError::Network(_) => Some(
            "Hint: Check your network connection or raise --timeout-secs.".to_string(),
        ),
        RegistryError::Runtime(runtime_err) => Some(runtime_hint(runtime_err)),
        _ => None,
    }
}

fn missing_setting_hint(name: &str) -> String {
    match name {
        "username" => "Hint: Pass --username or set DOCKERHUB_USER_NAME.".to_string(),
        "api key" => "Hint: Pass --api-key or set DOCKERHUB_API_KEY.".to_string(),
        other => format!("Hint: Provide a value for {}.", other),
    }
}

fn runtime_hint(err: &RuntimeError) -> String {
    match err {
        RuntimeError::Spawn { binary, .. } => format!(
            "Hint: Is `{}` installed and on PATH? Use --runtime to pick another binary.",
            binary
        ),
        RuntimeError::Exited { .. } => {
            "Hint: See the container runtime output above for details.".to_string()
        }
        RuntimeError::Cancelled { .. } => {
            "Hint: Interrupted; remaining runtime commands were skipped.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_for_missing_api_key() {
        let err: anyhow::Error = ConfigError::MissingSetting { name: "api key" }.into();
        assert!(hint_for(&err).unwrap().contains("DOCKERHUB_API_KEY"));
    }

    #[test]
    fn test_hint_for_wrapped_config_error() {
        let err: anyhow::Error =
            RegistryError::Config(ConfigError::MissingSetting { name: "username" }).into();
        assert!(hint_for(&err).unwrap().contains("DOCKERHUB_USER_NAME"));
    }

    #[test]
    fn test_hint_for_missing_runtime() {
        let err: anyhow::Error = RegistryError::Runtime(RuntimeError::Spawn {
            binary: "podman".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        })
        .into();
        assert!(hint_for(&err).unwrap().contains("`podman`"));
    }

    #[test]
    fn test_no_hint_for_decode_error() {
        let source = serde_json::from_str::<u32>("x").unwrap_err();
        let err: anyhow::Error = RegistryError::Decode {
            what: "tag list",
            source,
        }
        .into();
        assert!(hint_for(&err).is_none());
    }

    #[test]
    fn test_no_hint_for_cli_error() {
        let err: anyhow::Error = CliError::InvalidRepository("widget".to_string()).into();
        assert!(hint_for(&err).is_none());
    }
}
