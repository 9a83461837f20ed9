//! Client configuration.
//!
//! The caller (usually the CLI) resolves settings from flags, environment and
//! files, then passes the result in explicitly. Nothing here reads global
//! state.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Docker Hub API endpoint.
pub const DEFAULT_API_URL: &str = "https://hub.docker.com";

/// Deadline for each registry call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration errors, raised before any network traffic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting was absent or blank.
    #[error("missing required setting: {name}")]
    MissingSetting { name: &'static str },
}

/// Registry username and API key (or password).
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    secret: String,
}

impl Credentials {
    /// Create credentials, rejecting blank values.
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Result<Self, ConfigError> {
        Self::resolve(Some(username.into()), Some(secret.into()))
    }

    /// Build credentials from optional inputs.
    ///
    /// Absent, empty and whitespace-only values all count as missing. The
    /// username is checked first.
    pub fn resolve(username: Option<String>, secret: Option<String>) -> Result<Self, ConfigError> {
        let username = username
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingSetting { name: "username" })?;

        let secret = secret
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingSetting { name: "api key" })?;

        Ok(Self { username, secret })
    }

    /// Registry username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// API key or password.
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Everything [`HubClient::connect`](crate::HubClient::connect) needs.
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Resolved credentials.
    pub credentials: Credentials,

    /// API base URL, without trailing slash.
    pub api_url: String,

    /// Per-request deadline.
    pub timeout: Duration,
}

impl HubConfig {
    /// Configuration for the public Docker Hub with default timeout.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the API base URL.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the per-request deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, Some("key"), "username")]
    #[case(Some(""), Some("key"), "username")]
    #[case(Some("   "), Some("key"), "username")]
    #[case(Some("acme"), None, "api key")]
    #[case(Some("acme"), Some(""), "api key")]
    #[case(None, None, "username")]
    fn test_missing_credentials(
        #[case] username: Option<&str>,
        #[case] secret: Option<&str>,
        #[case] missing: &'static str,
    ) {
        let err = Credentials::resolve(
            username.map(str::to_string),
            secret.map(str::to_string),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::MissingSetting { name: missing });
    }

    #[test]
    fn test_credentials_trim_username() {
        let creds = Credentials::new(" acme ", "key").unwrap();
        assert_eq!(creds.username(), "acme");
        assert_eq!(creds.secret(), "key");
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = Credentials::new("acme", "hunter2").unwrap();
        let debug = format!("{:?}", creds);
        assert!(debug.contains("acme"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_config_defaults_and_overrides() {
        let creds = Credentials::new("acme", "key").unwrap();
        let config = HubConfig::new(creds.clone());
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);

        let config = HubConfig::new(creds)
            .with_api_url("http://127.0.0.1:9000/")
            .with_timeout(Duration::from_millis(250));
        assert_eq!(config.api_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout, Duration::from_millis(250));
    }
}
