//! Rows written into empty stores on first run.

use crate::{
  color_tag::{ColorTagDraft, ColorTagId},
  contact::{ContactDraft, ContactId},
};

/// `(id, hex, name)` of every default color tag.
pub const DEFAULT_COLOR_TAGS: [(ColorTagId, &str, &str); 5] = [
  (1, "#9E9E9E", "Mobile"),
  (2, "#00ACC1", "Home"),
  (3, "#4CAF50", "Work"),
  (4, "#FF9800", "Emergency"),
  (5, "#78453A", "Other"),
];

/// The tag new contacts fall back to.
pub const DEFAULT_COLOR_TAG: (ColorTagId, &str, &str) = DEFAULT_COLOR_TAGS[0];

/// `(id, name, number, color_tag_id)` of every default contact. None of them
/// are checkable and none start in the trash.
pub const DEFAULT_CONTACTS: [(ContactId, &str, &str, ColorTagId); 7] = [
  (1, "Bobby", "0123456789", 1),
  (2, "Mom", "0887896541", 1),
  (3, "Home", "035478988", 2),
  (4, "service", "0999987123", 5),
  (5, "Rick Grimes", "0841255666", 3),
  (6, "Alisson Becker", "0124789639", 1),
  (7, "Police", "191", 4),
];

pub fn default_color_tags() -> Vec<ColorTagDraft> {
  DEFAULT_COLOR_TAGS
    .iter()
    .map(|&(id, hex, name)| ColorTagDraft {
      id:   Some(id),
      hex:  hex.to_owned(),
      name: name.to_owned(),
    })
    .collect()
}

pub fn default_contacts() -> Vec<ContactDraft> {
  DEFAULT_CONTACTS
    .iter()
    .map(|&(id, name, number, color_tag_id)| ContactDraft {
      id: Some(id),
      name: name.to_owned(),
      number: number.to_owned(),
      can_be_checked_off: false,
      is_checked_off: false,
      color_tag_id,
      is_in_trash: false,
    })
    .collect()
}
