//! Repository listing.

use anyhow::Result;
use clap::Args;

use crate::output::{print_info, print_json, print_table, OutputFormat, RepositoryRow};

use super::CommandContext;

/// List repositories (first page, most recently updated first).
#[derive(Debug, Args)]
pub struct ReposCommand {
    /// Namespace to list. Defaults to the authenticated user.
    #[arg(long)]
    namespace: Option<String>,
}

impl ReposCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let client = ctx.connect().await?;
        let namespace = self
            .namespace
            .unwrap_or_else(|| client.username().to_string());

        let list = client.list_repositories(&namespace).await?;

        match ctx.format {
            OutputFormat::Json => print_json(&list),
            OutputFormat::Table => {
                let rows: Vec<RepositoryRow> =
                    list.results.iter().map(RepositoryRow::from).collect();
                print_table(&rows);
                if list.is_truncated() {
                    print_info(&format!(
                        "Showing {} of {} repositories.",
                        list.results.len(),
                        list.count
                    ));
                }
            }
        }

        Ok(())
    }
}
