//! Color tags — named color labels attached to contacts for visual grouping.
//!
//! Color tags are written once, at first run, and never updated or deleted
//! afterwards.

use serde::{Deserialize, Serialize};

use crate::seed;

/// Store-assigned identifier of a color tag.
pub type ColorTagId = i64;

// ─── Persisted ───────────────────────────────────────────────────────────────

/// A color tag row as persisted by a [`crate::store::ColorTagStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTag {
  pub id:   ColorTagId,
  /// Color string, e.g. `"#9E9E9E"`.
  pub hex:  String,
  pub name: String,
}

/// Input to [`crate::store::ColorTagStore::insert_color_tags`].
/// When `id` is `None` the store assigns one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTagDraft {
  pub id:   Option<ColorTagId>,
  pub hex:  String,
  pub name: String,
}

impl ColorTagDraft {
  pub fn new(hex: impl Into<String>, name: impl Into<String>) -> Self {
    Self { id: None, hex: hex.into(), name: name.into() }
  }
}

// ─── View ────────────────────────────────────────────────────────────────────

/// Presentation-side copy of a [`ColorTag`]. Same shape, separate type, so the
/// storage schema can evolve independently of what consumers render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTagView {
  pub id:   ColorTagId,
  pub name: String,
  pub hex:  String,
}

impl ColorTagView {
  /// The well-known default tag, used for new contacts when the store has no
  /// color tags to pick from.
  pub fn fallback() -> Self {
    let (id, hex, name) = seed::DEFAULT_COLOR_TAG;
    Self { id, name: name.to_owned(), hex: hex.to_owned() }
  }
}

impl Default for ColorTagView {
  fn default() -> Self { Self::fallback() }
}
