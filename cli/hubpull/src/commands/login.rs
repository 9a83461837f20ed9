//! Local runtime login.

use anyhow::Result;
use clap::Args;
use hubpull_registry::workflow;

use crate::output::{print_json, print_success, OutputFormat};

use super::CommandContext;

/// Verify credentials with Docker Hub, then log the local runtime in.
#[derive(Debug, Args)]
pub struct LoginCommand {}

impl LoginCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let client = ctx.connect().await?;
        let runtime = ctx.runtime();

        workflow::login_locally(&client, &runtime).await?;

        match ctx.format {
            OutputFormat::Json => print_json(&serde_json::json!({
                "ok": true,
                "username": client.username(),
                "runtime": ctx.settings.runtime,
            })),
            OutputFormat::Table => print_success(&format!(
                "Logged in to {} as {}.",
                ctx.settings.runtime,
                client.username()
            )),
        }

        Ok(())
    }
}
