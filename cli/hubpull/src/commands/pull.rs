//! Pull the latest image of repositories.

use anyhow::Result;
use clap::Args;
use hubpull_registry::{workflow, Repository};
use hubpull_runtime::{ContainerRuntime, MockRuntime};

use crate::output::{print_info, print_json, print_success, OutputFormat};

use super::{CommandContext, RepoArg};

/// Log the runtime in, then pull the newest pullable tag of each repository.
///
/// Without arguments, every repository on the first page of the
/// authenticated user's listing is pulled.
#[derive(Debug, Args)]
pub struct PullCommand {
    /// Repositories as `namespace/name`.
    repositories: Vec<RepoArg>,

    /// Resolve references without invoking the container runtime.
    #[arg(long)]
    dry_run: bool,
}

impl PullCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let client = ctx.connect().await?;

        let repos: Vec<Repository> = if self.repositories.is_empty() {
            client.list_repositories(client.username()).await?.results
        } else {
            self.repositories.iter().map(RepoArg::repository).collect()
        };

        let cli_runtime;
        let mock_runtime;
        let runtime: &dyn ContainerRuntime = if self.dry_run {
            mock_runtime = MockRuntime::new();
            &mock_runtime
        } else {
            cli_runtime = ctx.runtime();
            workflow::login_locally(&client, &cli_runtime).await?;
            &cli_runtime
        };

        let summary = workflow::pull_all(&client, runtime, &repos).await?;

        match ctx.format {
            OutputFormat::Json => print_json(&summary),
            OutputFormat::Table => {
                for reference in &summary.pulled {
                    if self.dry_run {
                        print_info(&format!("Would pull {}", reference));
                    } else {
                        print_success(&format!("Pulled {}", reference));
                    }
                }
                for repo in &summary.skipped {
                    print_info(&format!("Skipped {}: no tag with a platform image", repo));
                }
            }
        }

        Ok(())
    }
}
