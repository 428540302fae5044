//! Column lists and row decoders shared by the queries in [`crate::store`].
//!
//! Booleans are stored as `0`/`1` integers; ids are SQLite rowids.

use phonebook_core::{color_tag::ColorTag, contact::Contact};

/// Column order expected by [`decode_color_tag`].
pub const COLOR_TAG_COLUMNS: &str = "id, hex, name";

/// Column order expected by [`decode_contact`].
pub const CONTACT_COLUMNS: &str =
  "id, name, number, can_be_checked_off, is_checked_off, color_id, in_trash";

pub fn decode_color_tag(row: &rusqlite::Row<'_>) -> rusqlite::Result<ColorTag> {
  Ok(ColorTag {
    id:   row.get(0)?,
    hex:  row.get(1)?,
    name: row.get(2)?,
  })
}

pub fn decode_contact(row: &rusqlite::Row<'_>) -> rusqlite::Result<Contact> {
  Ok(Contact {
    id:                 row.get(0)?,
    name:               row.get(1)?,
    number:             row.get(2)?,
    can_be_checked_off: row.get(3)?,
    is_checked_off:     row.get(4)?,
    color_tag_id:       row.get(5)?,
    is_in_trash:        row.get(6)?,
  })
}

/// `?, ?, …` with one placeholder per id, for `IN (…)` clauses.
pub fn placeholders(n: usize) -> String { vec!["?"; n].join(", ") }
