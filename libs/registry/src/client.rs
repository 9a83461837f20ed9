//! Authenticated Docker Hub API client.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::{Credentials, HubConfig};
use crate::error::RegistryError;
use crate::select::select_pull_target;
use crate::session::{self, Token};
use crate::types::{Repository, RepositoryList, TagList};

/// Items requested per listing. Only the first page is ever fetched.
pub const PAGE_SIZE: u32 = 25;

/// Query shared by every listing: first page, most recently updated first.
const LIST_QUERY: [(&str, &str); 3] = [
    ("page_size", "25"),
    ("page", "1"),
    ("ordering", "last_updated"),
];

/// A client holding a bearer token.
///
/// Holding a `HubClient` means authentication succeeded. The token is set
/// once in [`HubClient::connect`] and read-only afterwards. Calls are meant
/// to be issued one at a time; clone the client or create another one to
/// work on several repositories in parallel.
#[derive(Debug, Clone)]
pub struct HubClient {
    http: Client,
    base_url: String,
    credentials: Credentials,
    token: Token,
}

impl HubClient {
    /// Authenticate and return a ready client.
    ///
    /// Fails without a client if the login call fails in any way.
    pub async fn connect(config: &HubConfig) -> Result<Self, RegistryError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("hubpull/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(RegistryError::Network)?;

        let base_url = config.api_url.trim_end_matches('/').to_string();
        info!(
            api_url = %base_url,
            username = %config.credentials.username(),
            "Connecting to registry"
        );

        let token = session::authenticate(&http, &base_url, &config.credentials).await?;

        Ok(Self {
            http,
            base_url,
            credentials: config.credentials.clone(),
            token,
        })
    }

    /// Username the client authenticated as.
    pub fn username(&self) -> &str {
        self.credentials.username()
    }

    /// Credentials the client authenticated with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Session token.
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// List the first page of repositories under `username`.
    pub async fn list_repositories(&self, username: &str) -> Result<RepositoryList, RegistryError> {
        let path = format!("/v2/repositories/{}/", username);
        let list: RepositoryList = self.get(&path, "repository list").await?;
        debug!(
            username = %username,
            count = list.count,
            returned = list.results.len(),
            "Listed repositories"
        );
        Ok(list)
    }

    /// List the first page of tags in `namespace/name`.
    pub async fn list_tags(&self, namespace: &str, name: &str) -> Result<TagList, RegistryError> {
        let path = format!("/v2/repositories/{}/{}/tags/", namespace, name);
        let list: TagList = self.get(&path, "tag list").await?;
        debug!(
            namespace = %namespace,
            name = %name,
            count = list.count,
            returned = list.results.len(),
            "Listed tags"
        );
        Ok(list)
    }

    /// Reference of the newest pullable tag of `repo`, if any.
    pub async fn latest_image(&self, repo: &Repository) -> Result<Option<String>, RegistryError> {
        let tags = self.list_tags(&repo.namespace, &repo.name).await?;
        Ok(select_pull_target(&tags, repo))
    }

    /// GET a listing endpoint and decode the body.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        what: &'static str,
    ) -> Result<T, RegistryError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Fetching {}", what);

        let response = self
            .http
            .get(&url)
            .query(&LIST_QUERY)
            .bearer_auth(self.token.as_str())
            .send()
            .await
            .map_err(RegistryError::transport)?;

        let status = response.status();
        let body = response.text().await.map_err(RegistryError::transport)?;

        if status != StatusCode::OK {
            warn!(url = %url, status = %status, "Registry returned an error");
            return Err(RegistryError::Api {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| RegistryError::Decode { what, source })
    }
}
