//! Tag listing.

use anyhow::Result;
use clap::Args;
use hubpull_registry::RegistryError;

use crate::error::CliError;
use crate::output::{print_info, print_json, print_table, OutputFormat, TagRow};

use super::{CommandContext, RepoArg};

/// List tags of a repository (first page, most recently updated first).
#[derive(Debug, Args)]
pub struct TagsCommand {
    /// Repository as `namespace/name` (bare names resolve to `library/`).
    repository: RepoArg,
}

impl TagsCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let client = ctx.connect().await?;
        let repo = &self.repository;

        let list = client
            .list_tags(&repo.namespace, &repo.name)
            .await
            .map_err(|e| match e {
                RegistryError::Api { status: 404, .. } => {
                    anyhow::Error::from(CliError::NotFound(repo.to_string()))
                }
                other => other.into(),
            })?;

        match ctx.format {
            OutputFormat::Json => print_json(&list),
            OutputFormat::Table => {
                let rows: Vec<TagRow> = list.results.iter().map(TagRow::from).collect();
                print_table(&rows);
                if list.is_truncated() {
                    print_info(&format!("Showing {} of {} tags.", list.results.len(), list.count));
                }
            }
        }

        Ok(())
    }
}
