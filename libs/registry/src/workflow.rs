//! Local login and pull on top of a connected client.
//!
//! These functions are the only place where registry data reaches the
//! container runtime. `pull` is only ever called with a reference produced
//! by [`select_pull_target`](crate::select_pull_target).

use hubpull_runtime::ContainerRuntime;
use serde::Serialize;
use tracing::info;

use crate::client::HubClient;
use crate::error::RegistryError;
use crate::types::Repository;

/// Outcome of pulling several repositories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PullSummary {
    /// References that were pulled, in order.
    pub pulled: Vec<String>,

    /// Repositories (`namespace/name`) with no pullable tag.
    pub skipped: Vec<String>,
}

/// Register the client's credentials with the local runtime.
pub async fn login_locally(
    client: &HubClient,
    runtime: &dyn ContainerRuntime,
) -> Result<(), RegistryError> {
    let credentials = client.credentials();
    runtime
        .login(credentials.username(), credentials.secret())
        .await?;
    Ok(())
}

/// Pull the newest pullable tag of `repo`.
///
/// Returns the reference that was pulled, or `None` when the repository has
/// no tag with a platform image. In that case the runtime is not invoked.
pub async fn pull_latest(
    client: &HubClient,
    runtime: &dyn ContainerRuntime,
    repo: &Repository,
) -> Result<Option<String>, RegistryError> {
    let Some(reference) = client.latest_image(repo).await? else {
        info!(repository = %repo.full_name(), "No pullable tag, skipping");
        return Ok(None);
    };

    runtime.pull(&reference).await?;
    Ok(Some(reference))
}

/// Pull the newest image of each repository, one after another.
///
/// Stops at the first failure.
pub async fn pull_all(
    client: &HubClient,
    runtime: &dyn ContainerRuntime,
    repos: &[Repository],
) -> Result<PullSummary, RegistryError> {
    let mut summary = PullSummary::default();

    for repo in repos {
        match pull_latest(client, runtime, repo).await? {
            Some(reference) => summary.pulled.push(reference),
            None => summary.skipped.push(repo.full_name()),
        }
    }

    info!(
        pulled = summary.pulled.len(),
        skipped = summary.skipped.len(),
        "Finished pulling repositories"
    );
    Ok(summary)
}
