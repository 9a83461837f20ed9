//! Output formatting for CLI commands.

use chrono::{DateTime, Utc};
use colored::Colorize;
use hubpull_registry::{Repository, Tag};
use serde::Serialize;
use tabled::{Table, Tabled};

const CLI_SCHEMA_VERSION: &str = "hubpull.cli.v1";

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
}

impl OutputFormat {
    /// Parse the `--format` flag. Anything other than `json` is a table.
    pub fn parse(value: &str) -> Self {
        match value {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Table,
        }
    }
}

/// Print a list of rows as a table.
pub fn print_table<T: Tabled>(rows: &[T]) {
    if rows.is_empty() {
        println!("{}", "No items found.".dimmed());
    } else {
        println!("{}", Table::new(rows));
    }
}

/// Print a single value as JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) {
    println!("{}", format_json(data));
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "Success:".green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "Info:".blue().bold(), message);
}

fn format_json<T: Serialize + ?Sized>(data: &T) -> String {
    let value = serde_json::to_value(data).unwrap_or_else(|_| serde_json::json!({}));
    let wrapped = serde_json::json!({
        "schemaVersion": CLI_SCHEMA_VERSION,
        "data": value,
    });
    serde_json::to_string_pretty(&wrapped).unwrap_or_else(|_| "{}".to_string())
}

/// Table row for a repository.
#[derive(Debug, Tabled)]
pub struct RepositoryRow {
    #[tabled(rename = "Repository")]
    pub repository: String,

    #[tabled(rename = "Private")]
    pub private: String,

    #[tabled(rename = "Stars")]
    pub stars: u64,

    #[tabled(rename = "Pulls")]
    pub pulls: u64,

    #[tabled(rename = "Updated")]
    pub updated: String,
}

impl From<&Repository> for RepositoryRow {
    fn from(repo: &Repository) -> Self {
        Self {
            repository: repo.full_name(),
            private: (if repo.is_private { "yes" } else { "no" }).to_string(),
            stars: repo.star_count,
            pulls: repo.pull_count,
            updated: display_time(repo.last_updated),
        }
    }
}

/// Table row for a tag.
#[derive(Debug, Tabled)]
pub struct TagRow {
    #[tabled(rename = "Tag")]
    pub name: String,

    #[tabled(rename = "Platforms")]
    pub platforms: String,

    #[tabled(rename = "Size")]
    pub size: String,

    #[tabled(rename = "Pushed")]
    pub pushed: String,

    #[tabled(rename = "Digest")]
    pub digest: String,
}

impl From<&Tag> for TagRow {
    fn from(tag: &Tag) -> Self {
        let platforms = if tag.images.is_empty() {
            "-".to_string()
        } else {
            tag.images
                .iter()
                .map(|image| image.platform())
                .collect::<Vec<_>>()
                .join(", ")
        };

        Self {
            name: tag.name.clone(),
            platforms,
            size: tag.full_size.map(display_size).unwrap_or_else(|| "-".to_string()),
            pushed: display_time(tag.tag_last_pushed),
            digest: tag.digest.as_deref().map(short_digest).unwrap_or("-").to_string(),
        }
    }
}

fn display_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Human-readable byte size (binary units).
fn display_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

/// `sha256:0123456789ab…` shortened to the first 12 hex characters.
fn short_digest(digest: &str) -> &str {
    let hex = digest.split_once(':').map_or(digest, |(_, hex)| hex);
    hex.char_indices().nth(12).map_or(hex, |(end, _)| &hex[..end])
}
