//! Configuration inspection.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::output::{print_json, OutputFormat};

use super::CommandContext;

/// Show resolved configuration.
#[derive(Debug, Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
enum ConfigSubcommand {
    /// Show the effective settings (the API key is never printed).
    Show,

    /// Print the config file location.
    Path,
}

#[derive(Debug, Serialize)]
struct ConfigView {
    username: Option<String>,
    api_key_set: bool,
    api_url: String,
    runtime: String,
    timeout_secs: u64,
}

impl ConfigCommand {
    /// Whether the subcommand needs the config file's contents.
    pub fn reads_config_file(&self) -> bool {
        matches!(self.command, ConfigSubcommand::Show)
    }

    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            ConfigSubcommand::Show => show(ctx),
            ConfigSubcommand::Path => {
                println!("{}", ctx.config_file()?.display());
                Ok(())
            }
        }
    }
}

fn show(ctx: CommandContext) -> Result<()> {
    let settings = ctx.settings;
    let view = ConfigView {
        username: settings.username,
        api_key_set: settings.api_key.is_some_and(|k| !k.is_empty()),
        api_url: settings.api_url,
        runtime: settings.runtime,
        timeout_secs: settings.timeout.as_secs(),
    };

    match ctx.format {
        OutputFormat::Json => print_json(&view),
        OutputFormat::Table => {
            println!("username: {}", view.username.as_deref().unwrap_or("-"));
            println!("api_key: {}", if view.api_key_set { "set" } else { "-" });
            println!("api_url: {}", view.api_url);
            println!("runtime: {}", view.runtime);
            println!("timeout_secs: {}", view.timeout_secs);
        }
    }

    Ok(())
}
