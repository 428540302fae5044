//! Pure conversions between persisted rows and the read model.
//!
//! The join between contacts and color tags happens here. Nothing in this
//! module performs I/O.

use std::collections::HashMap;

use crate::{
  Error, Result,
  color_tag::{ColorTag, ColorTagId, ColorTagView},
  contact::{Contact, ContactDraft, ContactView},
};

/// Build the id → tag lookup expected by [`join_contacts`].
pub fn index_color_tags(
  color_tags: impl IntoIterator<Item = ColorTag>,
) -> HashMap<ColorTagId, ColorTag> {
  color_tags.into_iter().map(|t| (t.id, t)).collect()
}

/// Join every contact with its color tag, preserving input order.
///
/// Fails with [`Error::ColorTagNotFound`] as soon as a contact references a
/// tag missing from `color_tags`; no partial result is returned.
pub fn join_contacts(
  contacts: &[Contact],
  color_tags: &HashMap<ColorTagId, ColorTag>,
) -> Result<Vec<ContactView>> {
  contacts
    .iter()
    .map(|c| {
      let tag = color_tags.get(&c.color_tag_id).ok_or(Error::ColorTagNotFound {
        contact_id:   c.id,
        color_tag_id: c.color_tag_id,
      })?;
      Ok(join_contact(c, tag))
    })
    .collect()
}

/// Join a single contact with the color tag the caller already resolved.
pub fn join_contact(contact: &Contact, color_tag: &ColorTag) -> ContactView {
  ContactView {
    id:             contact.id,
    name:           contact.name.clone(),
    number:         contact.number.clone(),
    is_checked_off: contact.can_be_checked_off.then_some(contact.is_checked_off),
    color_tag:      to_color_tag_view(color_tag),
  }
}

pub fn to_color_tag_view(color_tag: &ColorTag) -> ColorTagView {
  ColorTagView {
    id:   color_tag.id,
    name: color_tag.name.clone(),
    hex:  color_tag.hex.clone(),
  }
}

pub fn to_color_tag_views(color_tags: &[ColorTag]) -> Vec<ColorTagView> {
  color_tags.iter().map(to_color_tag_view).collect()
}

/// Convert a view back into an insert draft.
///
/// The draft is always active: trash state never travels through this path.
/// A view carrying the sentinel id yields `id: None` so the store assigns one.
pub fn to_contact_draft(view: &ContactView) -> ContactDraft {
  ContactDraft {
    id:                 (!view.is_new()).then_some(view.id),
    name:               view.name.clone(),
    number:             view.number.clone(),
    can_be_checked_off: view.is_checked_off.is_some(),
    is_checked_off:     view.is_checked_off.unwrap_or(false),
    color_tag_id:       view.color_tag.id,
    is_in_trash:        false,
  }
}
