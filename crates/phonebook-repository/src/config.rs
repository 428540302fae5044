//! Repository settings.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
  /// Write the default color tags and contacts into empty tables on
  /// startup.
  pub seed_defaults: bool,
}

impl Default for RepositoryConfig {
  fn default() -> Self { Self { seed_defaults: true } }
}
