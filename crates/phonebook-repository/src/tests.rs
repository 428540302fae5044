//! Repository tests against an in-memory `SqliteStore`.

use std::sync::Arc;

use phonebook_core::{
  color_tag::{ColorTagDraft, ColorTagView},
  contact::{ContactDraft, ContactView, NEW_CONTACT_ID},
  feed::Subscription,
  seed,
  store::{ColorTagStore, ContactStore},
};
use phonebook_store_sqlite::SqliteStore;

use crate::{Error, InitState, Repository, RepositoryConfig};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

/// A repository over freshly seeded default data.
async fn repo() -> Repository<SqliteStore> {
  let repo = Repository::open(store().await, RepositoryConfig::default());
  repo.initialized().await.expect("initialized");
  repo
}

fn active(repo: &Repository<SqliteStore>) -> Arc<Vec<ContactView>> {
  repo.active_contacts().latest().expect("active snapshot")
}

fn trashed(repo: &Repository<SqliteStore>) -> Arc<Vec<ContactView>> {
  repo.trashed_contacts().latest().expect("trashed snapshot")
}

fn ids(list: &[ContactView]) -> Vec<i64> { list.iter().map(|c| c.id).collect() }

/// Wait until the color-tag collection holds `n` tags.
async fn tags_with_len(mut sub: Subscription<ColorTagView>, n: usize) -> Arc<Vec<ColorTagView>> {
  loop {
    if let Some(tags) = sub.latest()
      && tags.len() == n
    {
      return tags;
    }
    sub.changed().await.expect("color tag feed open");
  }
}

// ─── Initialization ──────────────────────────────────────────────────────────

#[tokio::test]
async fn seeds_empty_stores_and_publishes() {
  let repo = repo().await;
  assert_eq!(repo.init_state(), InitState::Ready);

  let active = active(&repo);
  assert_eq!(ids(&active), [1, 2, 3, 4, 5, 6, 7]);
  assert!(trashed(&repo).is_empty());

  let police = &active[6];
  assert_eq!(police.name, "Police");
  assert_eq!(police.color_tag.name, "Emergency");
  assert_eq!(police.color_tag.hex, "#FF9800");
  assert!(active.iter().all(|c| c.is_checked_off.is_none()));

  let tags = tags_with_len(repo.color_tags(), 5).await;
  let names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
  assert_eq!(names, ["Mobile", "Home", "Work", "Emergency", "Other"]);
}

#[tokio::test]
async fn early_subscriber_waits_for_first_snapshot() {
  let repo = Repository::open(store().await, RepositoryConfig::default());
  let mut sub = repo.active_contacts();

  let first = sub.first().await.expect("first snapshot");
  assert_eq!(first.len(), 7);
}

#[tokio::test]
async fn early_color_tag_subscriber_sees_seeded_tags() {
  let repo = Repository::open(store().await, RepositoryConfig::default());
  let mut sub = repo.color_tags();
  assert!(sub.latest().is_none());

  let first = sub.first().await.expect("first color tags");
  assert_eq!(first.len(), 5);
}

#[tokio::test]
async fn does_not_reseed_populated_stores() {
  let s = store().await;
  s.insert_color_tags(vec![ColorTagDraft::new("#123456", "Mine")])
    .await
    .unwrap();
  let tag_id = s.list_color_tags().await.unwrap()[0].id;
  s.upsert_contact(ContactDraft {
    id: None,
    name: "Only".into(),
    number: "1".into(),
    can_be_checked_off: false,
    is_checked_off: false,
    color_tag_id: tag_id,
    is_in_trash: false,
  })
  .await
  .unwrap();

  let repo = Repository::open(s, RepositoryConfig::default());
  repo.initialized().await.unwrap();

  let active = active(&repo);
  assert_eq!(active.len(), 1);
  assert_eq!(active[0].color_tag.name, "Mine");
}

#[tokio::test]
async fn seeding_can_be_disabled() {
  let repo = Repository::open(store().await, RepositoryConfig { seed_defaults: false });
  repo.initialized().await.unwrap();

  assert!(active(&repo).is_empty());
  assert!(trashed(&repo).is_empty());
  assert!(tags_with_len(repo.color_tags(), 0).await.is_empty());
}

#[tokio::test]
async fn dangling_color_tag_fails_initialization() {
  let s = store().await;
  s.insert_contacts(seed::default_contacts()).await.unwrap();

  // Contacts exist, so they are not reseeded; the tag table is left empty.
  let repo = Repository::open(s, RepositoryConfig { seed_defaults: false });
  let err = repo.initialized().await.unwrap_err();
  assert!(matches!(err, Error::Init(_)));
  assert!(matches!(repo.init_state(), InitState::Failed(_)));

  let err = repo.move_to_trash(1).await.unwrap_err();
  assert!(matches!(err, Error::Init(_)));
}

// ─── Insert ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn inserting_new_contact_assigns_fresh_id() {
  let repo = repo().await;
  let before = ids(&active(&repo));

  let mut view = repo.blank_contact().await.unwrap();
  view.name = "Newcomer".into();
  view.number = "0700".into();
  repo.insert_contact(view).await.unwrap();

  let after = active(&repo);
  assert_eq!(after.len(), before.len() + 1);
  let created = after.iter().find(|c| c.name == "Newcomer").unwrap();
  assert_ne!(created.id, NEW_CONTACT_ID);
  assert!(!before.contains(&created.id));
}

#[tokio::test]
async fn inserting_existing_id_overwrites() {
  let repo = repo().await;

  let mut bobby = repo.find_contact(1).await.unwrap();
  bobby.name = "Robert".into();
  bobby.is_checked_off = Some(true);
  bobby.color_tag = tags_with_len(repo.color_tags(), 5).await[2].clone();
  repo.insert_contact(bobby.clone()).await.unwrap();

  let active = active(&repo);
  assert_eq!(active.len(), 7);
  assert_eq!(active.iter().find(|c| c.id == 1), Some(&bobby));
}

#[tokio::test]
async fn inserting_unknown_color_tag_is_an_integrity_error() {
  let s = store().await;
  let repo = Repository::open(s.clone(), RepositoryConfig::default());
  repo.initialized().await.unwrap();

  let mut view = ContactView::default();
  view.name = "Ghost".into();
  view.color_tag.id = 99;
  let mut sub = repo.active_contacts();
  sub.first().await.expect("active snapshot");

  let err = repo.insert_contact(view).await.unwrap_err();
  assert!(matches!(
    err,
    Error::Core(phonebook_core::Error::ColorTagNotFound { color_tag_id: 99, .. })
  ));
  assert!(!sub.has_changed());
  assert_eq!(s.list_contacts().await.unwrap().len(), 7);

  repo.move_to_trash(1).await.unwrap();
  assert_eq!(ids(&active(&repo)), [2, 3, 4, 5, 6, 7]);
  assert_eq!(ids(&trashed(&repo)), [1]);
}

// ─── Trash ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn move_to_trash_moves_between_lists() {
  let repo = repo().await;
  let before = active(&repo).iter().find(|c| c.id == 5).cloned().unwrap();
  assert!(trashed(&repo).is_empty());

  repo.move_to_trash(5).await.unwrap();

  assert!(!ids(&active(&repo)).contains(&5));
  let trashed = trashed(&repo);
  assert_eq!(*trashed, vec![before]);
}

#[tokio::test]
async fn move_to_trash_missing_id_is_not_found() {
  let repo = repo().await;
  let active_sub = repo.active_contacts();
  let before_active = active(&repo);
  let before_trashed = trashed(&repo);

  let err = repo.move_to_trash(404).await.unwrap_err();
  assert!(err.is_not_found());

  // Nothing was republished.
  assert!(!active_sub.has_changed());
  assert_eq!(active(&repo), before_active);
  assert_eq!(trashed(&repo), before_trashed);
}

#[tokio::test]
async fn trashing_preserves_checked_state() {
  let repo = repo().await;
  let mut mom = repo.find_contact(2).await.unwrap();
  mom.is_checked_off = Some(true);
  repo.insert_contact(mom.clone()).await.unwrap();

  repo.move_to_trash(2).await.unwrap();
  let in_trash = trashed(&repo);
  assert_eq!(in_trash[0], mom);
}

#[tokio::test]
async fn restore_skips_missing_ids() {
  let repo = repo().await;
  repo.move_to_trash(3).await.unwrap();
  assert_eq!(ids(&trashed(&repo)), [3]);

  repo.restore_from_trash(vec![3, 999]).await.unwrap();

  assert!(trashed(&repo).is_empty());
  assert_eq!(ids(&active(&repo)), [1, 2, 3, 4, 5, 6, 7]);
}

#[tokio::test]
async fn deleted_contact_cannot_be_restored() {
  let repo = repo().await;
  repo.move_to_trash(4).await.unwrap();
  repo.delete_contacts(vec![4]).await.unwrap();

  assert!(trashed(&repo).is_empty());
  assert!(!ids(&active(&repo)).contains(&4));

  repo.restore_from_trash(vec![4]).await.unwrap();
  assert!(trashed(&repo).is_empty());
  assert!(!ids(&active(&repo)).contains(&4));
  assert!(repo.find_contact(4).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn saving_a_trashed_contact_restores_it() {
  let repo = repo().await;
  repo.move_to_trash(6).await.unwrap();
  let view = repo.find_contact(6).await.unwrap();

  repo.insert_contact(view).await.unwrap();
  assert!(trashed(&repo).is_empty());
}

// ─── Checked-off state ───────────────────────────────────────────────────────

#[tokio::test]
async fn set_checked_off_requires_checkable_contact() {
  let repo = repo().await;
  let err = repo.set_checked_off(1, true).await.unwrap_err();
  assert!(matches!(err, Error::Core(phonebook_core::Error::NotCheckable(1))));

  let err = repo.set_checked_off(500, true).await.unwrap_err();
  assert!(err.is_not_found());
}

#[tokio::test]
async fn set_checked_off_updates_checkable_contact() {
  let repo = repo().await;
  let mut home = repo.find_contact(3).await.unwrap();
  home.is_checked_off = Some(false);
  repo.insert_contact(home).await.unwrap();

  repo.set_checked_off(3, true).await.unwrap();
  assert_eq!(repo.find_contact(3).await.unwrap().is_checked_off, Some(true));

  repo.move_to_trash(3).await.unwrap();
  repo.set_checked_off(3, false).await.unwrap();
  let in_trash = trashed(&repo);
  assert_eq!(in_trash[0].id, 3);
  assert_eq!(in_trash[0].is_checked_off, Some(false));
}

// ─── Ordering and reads ──────────────────────────────────────────────────────

#[tokio::test]
async fn queued_operations_apply_in_order() {
  let repo = repo().await;

  // Fire and forget; only the last completion is awaited.
  drop(repo.move_to_trash(1));
  drop(repo.move_to_trash(2));
  drop(repo.restore_from_trash(vec![1]));
  repo.delete_contacts(vec![7]).await.unwrap();

  assert_eq!(ids(&trashed(&repo)), [2]);
  assert_eq!(ids(&active(&repo)), [1, 3, 4, 5, 6]);
}

#[tokio::test]
async fn blank_contact_uses_store_or_fallback_tag() {
  let repo = repo().await;
  let blank = repo.blank_contact().await.unwrap();
  assert!(blank.is_new());
  assert!(seed::DEFAULT_COLOR_TAGS.iter().any(|t| t.0 == blank.color_tag.id));

  let empty = Repository::open(store().await, RepositoryConfig { seed_defaults: false });
  empty.initialized().await.unwrap();
  let blank = empty.blank_contact().await.unwrap();
  assert_eq!(blank.color_tag, ColorTagView::fallback());
}

#[tokio::test]
async fn find_contact_missing_is_not_found() {
  let repo = repo().await;
  assert!(repo.find_contact(12345).await.unwrap_err().is_not_found());
}
