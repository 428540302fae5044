//! Layered configuration: built-in defaults, an optional TOML file, then
//! `PHONEBOOK_*` environment variables.
//!
//! ```toml
//! store_path = "~/.local/share/phonebook/phonebook.db"
//! log_level  = "info"
//!
//! [repository]
//! seed_defaults = true
//! ```
//!
//! Nested keys use `__` in the environment, e.g.
//! `PHONEBOOK_REPOSITORY__SEED_DEFAULTS=false`.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use phonebook_repository::RepositoryConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub store_path: PathBuf,
  /// Default tracing level; `RUST_LOG` still takes precedence.
  pub log_level:  String,
  pub repository: RepositoryConfig,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      store_path: PathBuf::from("phonebook.db"),
      log_level:  "warn".to_owned(),
      repository: RepositoryConfig::default(),
    }
  }
}

impl Settings {
  /// Read settings from `path` (if it exists) and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(
        config::Environment::with_prefix("PHONEBOOK")
          .prefix_separator("_")
          .separator("__"),
      )
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise settings")
  }
}
