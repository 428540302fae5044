//! [`Repository`] — the handle consumers hold.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, warn};

use phonebook_core::{
  color_tag::{ColorTag, ColorTagView},
  contact::{ContactId, ContactView},
  feed::{Feed, Subscription},
  mapper,
  store::{ColorTagStore, ContactStore},
};

use crate::{
  Completion, Error, Result,
  config::RepositoryConfig,
  error::store_err,
  worker::{Command, Op, Worker},
};

// ─── Initialization state ────────────────────────────────────────────────────

/// Progress of the one-off startup work (seeding and first publish).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitState {
  Pending,
  Ready,
  Failed(String),
}

// ─── Feeds ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub(crate) struct Feeds {
  pub active:     Feed<ContactView>,
  pub trashed:    Feed<ContactView>,
  pub color_tags: Feed<ColorTagView>,
}

// ─── Repository ──────────────────────────────────────────────────────────────

/// Mediates between a store and the consumers of its contents.
///
/// Cloning is cheap; all clones share the same worker and collections. The
/// worker stops once every clone has been dropped.
pub struct Repository<S> {
  store:    S,
  commands: mpsc::UnboundedSender<Command>,
  feeds:    Arc<Feeds>,
  init:     watch::Receiver<InitState>,
}

impl<S: Clone> Clone for Repository<S> {
  fn clone(&self) -> Self {
    Self {
      store:    self.store.clone(),
      commands: self.commands.clone(),
      feeds:    Arc::clone(&self.feeds),
      init:     self.init.clone(),
    }
  }
}

impl<S> Repository<S>
where
  S: ColorTagStore + ContactStore + Clone + 'static,
{
  /// Start a repository over `store`.
  ///
  /// Spawns the worker and the color-tag forwarder on the current tokio
  /// runtime and returns immediately. Initialization runs in the background;
  /// see [`Repository::initialized`].
  pub fn open(store: S, config: RepositoryConfig) -> Self {
    let feeds = Arc::new(Feeds::default());
    let (commands, rx) = mpsc::unbounded_channel();
    let (init_tx, init) = watch::channel(InitState::Pending);

    let worker = Worker {
      store: store.clone(),
      feeds: Arc::clone(&feeds),
      config,
      init: init_tx,
    };
    tokio::spawn(worker.run(rx));
    tokio::spawn(forward_color_tags(
      store.subscribe_color_tags(),
      Arc::clone(&feeds),
      init.clone(),
    ));

    Self { store, commands, feeds, init }
  }

  // ── Initialization ────────────────────────────────────────────────────────

  pub fn init_state(&self) -> InitState { self.init.borrow().clone() }

  /// Wait until startup has finished. Fails if seeding or the first publish
  /// failed.
  pub async fn initialized(&self) -> Result<()> {
    let mut init = self.init.clone();
    let state = init
      .wait_for(|s| *s != InitState::Pending)
      .await
      .map_err(|_| Error::Closed)?
      .clone();
    match state {
      InitState::Failed(message) => Err(Error::Init(message)),
      _ => Ok(()),
    }
  }

  // ── Observable collections ────────────────────────────────────────────────

  /// Contacts not in the trash, in store order.
  pub fn active_contacts(&self) -> Subscription<ContactView> {
    self.feeds.active.subscribe()
  }

  pub fn trashed_contacts(&self) -> Subscription<ContactView> {
    self.feeds.trashed.subscribe()
  }

  pub fn color_tags(&self) -> Subscription<ColorTagView> {
    self.feeds.color_tags.subscribe()
  }

  // ── Mutations ─────────────────────────────────────────────────────────────

  /// Save a contact. A view carrying the sentinel id is created with a fresh
  /// id; any other id overwrites that contact. The saved contact is always
  /// active.
  pub fn insert_contact(&self, view: ContactView) -> Completion {
    self.submit(Op::Insert(view))
  }

  /// Permanently delete contacts. Unknown ids are ignored.
  pub fn delete_contacts(&self, ids: Vec<ContactId>) -> Completion {
    self.submit(Op::Delete(ids))
  }

  /// Soft-delete a contact. Fails with not-found if `id` does not exist, in
  /// which case nothing is republished.
  pub fn move_to_trash(&self, id: ContactId) -> Completion {
    self.submit(Op::MoveToTrash(id))
  }

  /// Bring contacts back from the trash. Unknown ids are skipped.
  pub fn restore_from_trash(&self, ids: Vec<ContactId>) -> Completion {
    self.submit(Op::Restore(ids))
  }

  /// Tick or untick a checkable contact. Its trash state is left alone.
  pub fn set_checked_off(&self, id: ContactId, checked: bool) -> Completion {
    self.submit(Op::SetCheckedOff { id, checked })
  }

  fn submit(&self, op: Op) -> Completion {
    let (reply, rx) = oneshot::channel();
    if self.commands.send(Command { op, reply }).is_err() {
      // The reply sender went down with the command; the completion reports
      // `Closed`.
      warn!("repository worker has stopped; operation dropped");
    }
    Completion::new(rx)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// A new, unsaved contact with a randomly picked color tag, or the
  /// well-known default tag when the store has none.
  pub async fn blank_contact(&self) -> Result<ContactView> {
    let tag = self
      .store
      .random_color_tag()
      .await
      .map_err(store_err)?
      .map(|t| mapper::to_color_tag_view(&t))
      .unwrap_or_else(ColorTagView::fallback);
    Ok(ContactView::unsaved(tag))
  }

  /// The current joined view of one contact, trashed or not.
  pub async fn find_contact(&self, id: ContactId) -> Result<ContactView> {
    let row = self
      .store
      .find_contact(id)
      .await
      .map_err(store_err)?
      .ok_or(phonebook_core::Error::ContactNotFound(id))?;
    let tags = mapper::index_color_tags(
      self.store.list_color_tags().await.map_err(store_err)?,
    );
    let tag = tags.get(&row.color_tag_id).ok_or(
      phonebook_core::Error::ColorTagNotFound {
        contact_id:   row.id,
        color_tag_id: row.color_tag_id,
      },
    )?;
    Ok(mapper::join_contact(&row, tag))
  }
}

/// Mirror the store's color tags into the repository's feed as views.
///
/// Nothing is forwarded while startup is pending, so early subscribers never
/// see the table as it was before seeding.
async fn forward_color_tags(
  mut source: Subscription<ColorTag>,
  feeds: Arc<Feeds>,
  mut init: watch::Receiver<InitState>,
) {
  if init.wait_for(|s| *s != InitState::Pending).await.is_err() {
    debug!("repository worker gone before startup finished");
    return;
  }
  if let Some(tags) = source.first().await {
    feeds.color_tags.publish(mapper::to_color_tag_views(&tags));
  }
  while let Some(tags) = source.changed().await {
    debug!(count = tags.len(), "forwarding color tags");
    feeds.color_tags.publish(mapper::to_color_tag_views(&tags));
  }
  debug!("color tag source closed");
}
