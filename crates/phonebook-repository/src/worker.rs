//! The single writer behind a [`crate::Repository`].
//!
//! The worker seeds the stores, publishes the first snapshots, and then
//! applies queued operations strictly in arrival order. After each
//! successful operation both contact collections are rebuilt from a full
//! re-read of the stores.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, info, warn};

use phonebook_core::{
  contact::{ContactDraft, ContactId, ContactView},
  mapper, seed,
  store::{ColorTagStore, ContactStore},
};

use crate::{
  Error, Result,
  config::RepositoryConfig,
  error::store_err,
  repository::{Feeds, InitState},
};

// ─── Commands ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub(crate) enum Op {
  Insert(ContactView),
  Delete(Vec<ContactId>),
  MoveToTrash(ContactId),
  Restore(Vec<ContactId>),
  SetCheckedOff { id: ContactId, checked: bool },
}

#[derive(Debug)]
pub(crate) struct Command {
  pub op:    Op,
  pub reply: oneshot::Sender<Result<()>>,
}

// ─── Worker ──────────────────────────────────────────────────────────────────

pub(crate) struct Worker<S> {
  pub store:  S,
  pub feeds:  Arc<Feeds>,
  pub config: RepositoryConfig,
  pub init:   watch::Sender<InitState>,
}

impl<S> Worker<S>
where
  S: ColorTagStore + ContactStore,
{
  pub async fn run(self, mut commands: mpsc::UnboundedReceiver<Command>) {
    let failure = match self.initialize().await {
      Ok(()) => {
        info!("repository ready");
        self.init.send_replace(InitState::Ready);
        None
      }
      Err(e) => {
        error!(error = %e, "repository initialization failed");
        let message = e.to_string();
        self.init.send_replace(InitState::Failed(message.clone()));
        Some(message)
      }
    };

    while let Some(Command { op, reply }) = commands.recv().await {
      let result = match &failure {
        Some(message) => Err(Error::Init(message.clone())),
        None => self.apply(op).await,
      };
      if let Err(e) = &result {
        debug!(error = %e, "operation failed");
      }
      // The caller may have dropped its completion handle.
      let _ = reply.send(result);
    }

    debug!("repository worker stopped");
  }

  /// Seed empty tables (when enabled) and publish the first snapshots.
  async fn initialize(&self) -> Result<()> {
    if self.config.seed_defaults {
      if self.store.list_color_tags().await.map_err(store_err)?.is_empty() {
        let tags = self
          .store
          .insert_color_tags(seed::default_color_tags())
          .await
          .map_err(store_err)?;
        info!(count = tags.len(), "seeded default color tags");
      }

      if self.store.list_contacts().await.map_err(store_err)?.is_empty() {
        let contacts = self
          .store
          .insert_contacts(seed::default_contacts())
          .await
          .map_err(store_err)?;
        info!(count = contacts.len(), "seeded default contacts");
      }
    }

    self.republish().await
  }

  async fn apply(&self, op: Op) -> Result<()> {
    self.execute(op).await?;
    self.republish().await
  }

  async fn execute(&self, op: Op) -> Result<()> {
    match op {
      Op::Insert(view) => {
        let known = self
          .store
          .list_color_tags()
          .await
          .map_err(store_err)?
          .iter()
          .any(|t| t.id == view.color_tag.id);
        if !known {
          warn!(
            id = view.id,
            color_tag_id = view.color_tag.id,
            "refusing contact with unknown color tag"
          );
          return Err(
            phonebook_core::Error::ColorTagNotFound {
              contact_id:   view.id,
              color_tag_id: view.color_tag.id,
            }
            .into(),
          );
        }
        let saved = self
          .store
          .upsert_contact(mapper::to_contact_draft(&view))
          .await
          .map_err(store_err)?;
        debug!(id = saved.id, new = view.is_new(), "saved contact");
      }

      Op::Delete(ids) => {
        let removed = self.store.delete_contacts(&ids).await.map_err(store_err)?;
        debug!(requested = ids.len(), removed, "deleted contacts");
      }

      // Trash state is written from a copy of the stored row, never through
      // the view mapper, which always produces an active row.
      Op::MoveToTrash(id) => {
        let Some(row) = self.store.find_contact(id).await.map_err(store_err)? else {
          warn!(id, "cannot move missing contact to trash");
          return Err(phonebook_core::Error::ContactNotFound(id).into());
        };
        let draft = ContactDraft { is_in_trash: true, ..ContactDraft::from(row) };
        self.store.upsert_contact(draft).await.map_err(store_err)?;
        debug!(id, "moved contact to trash");
      }

      Op::Restore(ids) => {
        let rows = self.store.contacts_by_ids(&ids).await.map_err(store_err)?;
        let restored = rows.len();
        for row in rows {
          let draft = ContactDraft { is_in_trash: false, ..ContactDraft::from(row) };
          self.store.upsert_contact(draft).await.map_err(store_err)?;
        }
        debug!(requested = ids.len(), restored, "restored contacts");
      }

      Op::SetCheckedOff { id, checked } => {
        let Some(row) = self.store.find_contact(id).await.map_err(store_err)? else {
          return Err(phonebook_core::Error::ContactNotFound(id).into());
        };
        if !row.can_be_checked_off {
          return Err(phonebook_core::Error::NotCheckable(id).into());
        }
        let draft = ContactDraft { is_checked_off: checked, ..ContactDraft::from(row) };
        self.store.upsert_contact(draft).await.map_err(store_err)?;
        debug!(id, checked, "updated checked-off state");
      }
    }
    Ok(())
  }

  /// Re-read both tables, join, and publish the active and trashed lists.
  async fn republish(&self) -> Result<()> {
    let tags = mapper::index_color_tags(
      self.store.list_color_tags().await.map_err(store_err)?,
    );
    let (trashed, active): (Vec<_>, Vec<_>) = self
      .store
      .list_contacts()
      .await
      .map_err(store_err)?
      .into_iter()
      .partition(|c| c.is_in_trash);

    let active = mapper::join_contacts(&active, &tags).inspect_err(|e| {
      error!(error = %e, "cannot join active contacts");
    })?;
    let trashed = mapper::join_contacts(&trashed, &tags).inspect_err(|e| {
      error!(error = %e, "cannot join trashed contacts");
    })?;

    debug!(active = active.len(), trashed = trashed.len(), "publishing contacts");
    self.feeds.active.publish(active);
    self.feeds.trashed.publish(trashed);

    Ok(())
  }
}
