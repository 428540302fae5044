//! Error types for `phonebook-core`.

use thiserror::Error;

use crate::{color_tag::ColorTagId, contact::ContactId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
  #[error("contact not found: {0}")]
  ContactNotFound(ContactId),

  /// A contact references a color tag that was not part of the join input.
  /// Signals a referential-integrity violation, never a recoverable state.
  #[error(
    "color tag {color_tag_id} referenced by contact {contact_id} was not \
     found; all color tags must be supplied to the join"
  )]
  ColorTagNotFound {
    contact_id:   ContactId,
    color_tag_id: ColorTagId,
  },

  #[error("contact {0} cannot be checked off")]
  NotCheckable(ContactId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
