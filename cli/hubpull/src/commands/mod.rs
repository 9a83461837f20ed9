//! CLI commands.

mod config;
mod latest;
mod login;
mod pull;
mod repos;
mod tags;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hubpull_registry::{HubClient, Repository};
use hubpull_runtime::{ChildTracker, CliRuntime};
use tracing::debug;

use crate::config::{config_file, FileConfig, Overrides, Settings};
use crate::error::CliError;
use crate::output::OutputFormat;

/// Namespace Docker Hub uses for official images.
const OFFICIAL_NAMESPACE: &str = "library";

/// hubpull - List Docker Hub repositories and pull their latest images.
#[derive(Debug, Parser)]
#[command(name = "hubpull")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Docker Hub username.
    #[arg(long, global = true, env = "DOCKERHUB_USER_NAME")]
    username: Option<String>,

    /// Docker Hub API key (personal access token) or password.
    #[arg(long, global = true, env = "DOCKERHUB_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Registry API URL.
    #[arg(long, global = true, env = "HUBPULL_API_URL")]
    api_url: Option<String>,

    /// Container runtime binary used for login and pull.
    #[arg(long, global = true, env = "HUBPULL_RUNTIME")]
    runtime: Option<String>,

    /// Timeout for each registry request, in seconds.
    #[arg(long, global = true, env = "HUBPULL_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Config file to read instead of the default location.
    #[arg(long, global = true, env = "HUBPULL_CONFIG")]
    config: Option<PathBuf>,

    /// Output format (table or json).
    #[arg(long, global = true, default_value = "table")]
    format: String,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List repositories.
    Repos(repos::ReposCommand),

    /// List tags of a repository.
    Tags(tags::TagsCommand),

    /// Show the image reference that would be pulled for a repository.
    Latest(latest::LatestCommand),

    /// Log the local container runtime in to Docker Hub.
    Login(login::LoginCommand),

    /// Pull the latest image of one or more repositories.
    Pull(pull::PullCommand),

    /// Show resolved configuration.
    Config(config::ConfigCommand),

    /// Show CLI version.
    Version,
}

impl Commands {
    /// Whether the command uses settings from the config file.
    fn reads_config_file(&self) -> bool {
        match self {
            Commands::Version => false,
            Commands::Config(cmd) => cmd.reads_config_file(),
            _ => true,
        }
    }
}

impl Cli {
    /// Run the CLI command.
    ///
    /// Runtime processes started by the command are counted in `children`.
    pub async fn run(self, children: ChildTracker) -> Result<()> {
        let format = OutputFormat::parse(&self.format);
        let file = if self.command.reads_config_file() {
            FileConfig::load_from(&config_file(self.config.as_deref())?)?
        } else {
            FileConfig::default()
        };

        let overrides = Overrides {
            username: self.username,
            api_key: self.api_key,
            api_url: self.api_url,
            runtime: self.runtime,
            timeout_secs: self.timeout_secs,
        };
        let settings = Settings::resolve(overrides, file);
        debug!(
            api_url = %settings.api_url,
            runtime = %settings.runtime,
            timeout_secs = settings.timeout.as_secs(),
            "Resolved settings"
        );

        let ctx = CommandContext {
            settings,
            format,
            config: self.config,
            children,
        };

        match self.command {
            Commands::Repos(cmd) => cmd.run(ctx).await,
            Commands::Tags(cmd) => cmd.run(ctx).await,
            Commands::Latest(cmd) => cmd.run(ctx).await,
            Commands::Login(cmd) => cmd.run(ctx).await,
            Commands::Pull(cmd) => cmd.run(ctx).await,
            Commands::Config(cmd) => cmd.run(ctx).await,
            Commands::Version => {
                println!("hubpull {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub settings: Settings,
    pub format: OutputFormat,
    config: Option<PathBuf>,
    children: ChildTracker,
}

impl CommandContext {
    /// Resolve credentials and authenticate.
    ///
    /// Missing credentials fail here, before any request is sent.
    pub async fn connect(&self) -> Result<HubClient> {
        let config = self.settings.hub_config()?;
        Ok(HubClient::connect(&config).await?)
    }

    /// The configured container runtime.
    pub fn runtime(&self) -> CliRuntime {
        CliRuntime::new(self.settings.runtime.as_str()).with_tracker(self.children.clone())
    }

    /// The config file in effect.
    pub fn config_file(&self) -> Result<PathBuf> {
        config_file(self.config.as_deref())
    }
}

/// A repository given on the command line as `namespace/name` or `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoArg {
    pub namespace: String,
    pub name: String,
}

impl RepoArg {
    /// A repository record for this argument.
    pub fn repository(&self) -> Repository {
        Repository::new(&self.namespace, &self.name)
    }
}

impl FromStr for RepoArg {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CliError::InvalidRepository(s.to_string());

        let (namespace, name) = match s.split_once('/') {
            Some((namespace, name)) => (namespace, name),
            None => (OFFICIAL_NAMESPACE, s),
        };

        if namespace.is_empty() || name.is_empty() || name.contains('/') || name.contains(':') {
            return Err(invalid());
        }

        Ok(Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}
