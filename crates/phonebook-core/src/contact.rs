//! Contact types — persisted rows, insert drafts, and the joined read model.

use serde::{Deserialize, Serialize};

use crate::color_tag::{ColorTagId, ColorTagView};

/// Store-assigned identifier of a contact.
pub type ContactId = i64;

/// Reserved id carried by a [`ContactView`] that has never been persisted.
pub const NEW_CONTACT_ID: ContactId = -1;

// ─── Persisted ───────────────────────────────────────────────────────────────

/// A contact row as persisted by a [`crate::store::ContactStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  pub id:                 ContactId,
  pub name:               String,
  /// Free text; not validated as a phone number.
  pub number:             String,
  pub can_be_checked_off: bool,
  /// Only meaningful when `can_be_checked_off` is set.
  pub is_checked_off:     bool,
  pub color_tag_id:       ColorTagId,
  /// Soft-delete flag.
  pub is_in_trash:        bool,
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// Input to [`crate::store::ContactStore::upsert_contact`].
///
/// `id: None` asks the store to assign a fresh id; `Some(id)` overwrites the
/// row with that id in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
  pub id:                 Option<ContactId>,
  pub name:               String,
  pub number:             String,
  pub can_be_checked_off: bool,
  pub is_checked_off:     bool,
  pub color_tag_id:       ColorTagId,
  pub is_in_trash:        bool,
}

impl From<Contact> for ContactDraft {
  /// Re-saving a persisted row keeps its id, so the write is an overwrite.
  fn from(c: Contact) -> Self {
    Self {
      id:                 Some(c.id),
      name:               c.name,
      number:             c.number,
      can_be_checked_off: c.can_be_checked_off,
      is_checked_off:     c.is_checked_off,
      color_tag_id:       c.color_tag_id,
      is_in_trash:        c.is_in_trash,
    }
  }
}

// ─── View ────────────────────────────────────────────────────────────────────

/// The joined read model for a contact — never stored, always derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactView {
  pub id:             ContactId,
  pub name:           String,
  pub number:         String,
  /// `None` when the contact has no checkable state at all.
  pub is_checked_off: Option<bool>,
  pub color_tag:      ColorTagView,
}

impl ContactView {
  /// An empty, unsaved contact carrying the sentinel id.
  pub fn unsaved(color_tag: ColorTagView) -> Self {
    Self {
      id: NEW_CONTACT_ID,
      name: String::new(),
      number: String::new(),
      is_checked_off: None,
      color_tag,
    }
  }

  pub fn is_new(&self) -> bool { self.id == NEW_CONTACT_ID }
}

impl Default for ContactView {
  fn default() -> Self { Self::unsaved(ColorTagView::fallback()) }
}

/// Order contacts the way the list screen shows them: by name, ignoring
/// leading and trailing whitespace. The sort is stable.
pub fn sort_for_display(contacts: &mut [ContactView]) {
  contacts.sort_by(|a, b| a.name.trim().cmp(b.name.trim()));
}
