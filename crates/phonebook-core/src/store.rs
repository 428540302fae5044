//! The `ColorTagStore` and `ContactStore` traits.
//!
//! Both are implemented by storage backends (e.g. `phonebook-store-sqlite`).
//! The repository depends on these abstractions, not on any concrete backend.
//!
//! All methods return `Send` futures so the traits can be used from
//! multi-threaded async runtimes.

use std::future::Future;

use crate::{
  color_tag::{ColorTag, ColorTagDraft},
  contact::{Contact, ContactDraft, ContactId},
  feed::Subscription,
};

// ─── Color tags ──────────────────────────────────────────────────────────────

/// Persistent table of color tags. Insert-only: there is no update or delete.
pub trait ColorTagStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Live view of the whole table, republished after every change.
  fn subscribe_color_tags(&self) -> Subscription<ColorTag>;

  /// Point-in-time read of every color tag, ordered by id.
  fn list_color_tags(
    &self,
  ) -> impl Future<Output = Result<Vec<ColorTag>, Self::Error>> + Send + '_;

  /// One color tag picked uniformly at random, or `None` if the table is
  /// empty.
  fn random_color_tag(
    &self,
  ) -> impl Future<Output = Result<Option<ColorTag>, Self::Error>> + Send + '_;

  /// Persist new color tags. Drafts without an id get one assigned.
  /// Returns the persisted rows in input order.
  fn insert_color_tags(
    &self,
    drafts: Vec<ColorTagDraft>,
  ) -> impl Future<Output = Result<Vec<ColorTag>, Self::Error>> + Send + '_;
}

// ─── Contacts ────────────────────────────────────────────────────────────────

/// Persistent table of contacts, active and trashed alike.
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Point-in-time read of every contact, ordered by id.
  fn list_contacts(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Retrieve a contact by id. Returns `None` if not found.
  fn find_contact(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// The contacts whose id is in `ids`. Ids with no row are skipped.
  fn contacts_by_ids<'a>(
    &'a self,
    ids: &'a [ContactId],
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + 'a;

  /// Insert or overwrite a contact.
  ///
  /// With `draft.id == Some(id)` the row with that id is replaced in place
  /// (or created under that id). With `None` a fresh id is assigned.
  fn upsert_contact(
    &self,
    draft: ContactDraft,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Insert several contacts at once. Used to seed an empty store.
  fn insert_contacts(
    &self,
    drafts: Vec<ContactDraft>,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Permanently remove the given contacts. Unknown ids are ignored.
  /// Returns the number of rows removed.
  fn delete_contacts<'a>(
    &'a self,
    ids: &'a [ContactId],
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;
}
