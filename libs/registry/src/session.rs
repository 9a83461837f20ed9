//! Token-based session with the registry.
//!
//! One `PUT /v2/users/login` exchanges username and API key for a bearer
//! token. The token is held for the lifetime of the client and never
//! refreshed.

use std::fmt;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::Credentials;
use crate::error::RegistryError;

/// Login endpoint, relative to the API base URL.
pub const LOGIN_PATH: &str = "/v2/users/login";

/// Bearer token issued by the login endpoint.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Token {
    #[serde(rename = "token")]
    value: String,
}

impl Token {
    /// Raw token value.
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token").field("value", &"<redacted>").finish()
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Exchange credentials for a bearer token.
///
/// Only HTTP 200 with a `{"token": ...}` body counts as success. Every other
/// outcome is an [`RegistryError::Auth`] carrying the response body, except
/// transport failures (`Timeout`, `Network`).
pub async fn authenticate(
    http: &Client,
    base_url: &str,
    credentials: &Credentials,
) -> Result<Token, RegistryError> {
    let url = format!("{}{}", base_url, LOGIN_PATH);
    debug!(url = %url, username = %credentials.username(), "Requesting registry token");

    let response = http
        .put(&url)
        .json(&LoginRequest {
            username: credentials.username(),
            password: credentials.secret(),
        })
        .send()
        .await
        .map_err(RegistryError::transport)?;

    let status = response.status();
    let body = response.text().await.map_err(RegistryError::transport)?;

    if status != StatusCode::OK {
        warn!(status = %status, "Registry login rejected");
        return Err(RegistryError::Auth {
            status: Some(status.as_u16()),
            message: body,
        });
    }

    let token: Token = serde_json::from_str(&body).map_err(|e| RegistryError::Auth {
        status: Some(status.as_u16()),
        message: format!("invalid login response: {}", e),
    })?;

    info!(username = %credentials.username(), "Authenticated with registry");
    Ok(token)
}
