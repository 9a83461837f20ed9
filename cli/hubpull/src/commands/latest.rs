//! Show the pull target of a repository without pulling it.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::output::{print_info, print_json, OutputFormat};

use super::{CommandContext, RepoArg};

/// Show the image reference that `pull` would use.
#[derive(Debug, Args)]
pub struct LatestCommand {
    /// Repository as `namespace/name` (bare names resolve to `library/`).
    repository: RepoArg,
}

#[derive(Debug, Serialize)]
struct LatestView {
    repository: String,
    reference: Option<String>,
}

impl LatestCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let client = ctx.connect().await?;
        let reference = client.latest_image(&self.repository.repository()).await?;

        match ctx.format {
            OutputFormat::Json => print_json(&LatestView {
                repository: self.repository.to_string(),
                reference,
            }),
            OutputFormat::Table => match reference {
                Some(reference) => println!("{}", reference),
                None => print_info(&format!(
                    "{} has no tag with a platform image.",
                    self.repository
                )),
            },
        }

        Ok(())
    }
}
