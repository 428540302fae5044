//! `phonebook` — command-line front end for the phonebook repository.
//!
//! # Usage
//!
//! ```
//! phonebook list
//! phonebook add --name "Ada" --number 0123 --tag 3
//! phonebook remove 5 && phonebook restore 5
//! phonebook --config ~/.config/phonebook.toml --json trash
//! ```

mod commands;
mod settings;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Command, Format};
use phonebook_repository::Repository;
use phonebook_store_sqlite::SqliteStore;
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "phonebook", version, about = "Manage contacts and color tags")]
struct Cli {
  /// Path to a TOML config file (store_path, log_level, [repository]).
  #[arg(short, long, value_name = "FILE", default_value = "phonebook.toml")]
  config: PathBuf,

  /// SQLite database file; overrides `store_path` from the config.
  #[arg(long, env = "PHONEBOOK_DB", value_name = "PATH")]
  db: Option<PathBuf>,

  /// Print results as JSON instead of text.
  #[arg(long)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;

  let default_level = settings
    .log_level
    .parse::<LevelFilter>()
    .unwrap_or(LevelFilter::WARN);
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  // CLI flag overrides config file, which overrides the default.
  let store_path = expand_tilde(cli.db.as_deref().unwrap_or(&settings.store_path));
  if let Some(parent) = store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("creating {}", parent.display()))?;
  }

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  tracing::debug!(path = %store_path.display(), "opened store");

  let repo = Repository::open(store, settings.repository.clone());
  repo
    .initialized()
    .await
    .context("failed to initialize phonebook")?;

  let format = if cli.json { Format::Json } else { Format::Text };
  commands::run(&repo, cli.command, format).await
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
