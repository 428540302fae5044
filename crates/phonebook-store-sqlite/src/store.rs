//! [`SqliteStore`] — the SQLite implementation of [`ColorTagStore`] and
//! [`ContactStore`].

use std::{path::Path, sync::Arc};

use rusqlite::OptionalExtension as _;
use tracing::debug;

use phonebook_core::{
  color_tag::{ColorTag, ColorTagDraft},
  contact::{Contact, ContactDraft, ContactId},
  feed::{Feed, Subscription},
  store::{ColorTagStore, ContactStore},
};

use crate::{
  Result,
  encode::{
    COLOR_TAG_COLUMNS, CONTACT_COLUMNS, decode_color_tag, decode_contact,
    placeholders,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Both phonebook tables backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection and the color-tag feed are
/// reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn:       tokio_rusqlite::Connection,
  color_tags: Arc<Feed<ColorTag>>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::init(conn).await
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::init(conn).await
  }

  async fn init(conn: tokio_rusqlite::Connection) -> Result<Self> {
    let store = Self { conn, color_tags: Arc::new(Feed::new()) };
    store.init_schema().await?;
    store.refresh_color_tags().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Re-read the color tag table and push it to subscribers.
  async fn refresh_color_tags(&self) -> Result<()> {
    let tags = self.list_color_tags().await?;
    debug!(count = tags.len(), "publishing color tags");
    self.color_tags.publish(tags);
    Ok(())
  }
}

/// Ids bound per `IN (…)` statement; older SQLite builds cap a statement at
/// 999 variables.
const MAX_IDS_PER_STATEMENT: usize = 500;

// ─── ColorTagStore impl ──────────────────────────────────────────────────────

impl ColorTagStore for SqliteStore {
  type Error = crate::Error;

  fn subscribe_color_tags(&self) -> Subscription<ColorTag> {
    self.color_tags.subscribe()
  }

  async fn list_color_tags(&self) -> Result<Vec<ColorTag>> {
    let tags = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {COLOR_TAG_COLUMNS} FROM color_tags ORDER BY id"
        ))?;
        let rows = stmt
          .query_map([], decode_color_tag)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(tags)
  }

  async fn random_color_tag(&self) -> Result<Option<ColorTag>> {
    let tag = self
      .conn
      .call(|conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {COLOR_TAG_COLUMNS} FROM color_tags ORDER BY RANDOM() LIMIT 1"
              ),
              [],
              decode_color_tag,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(tag)
  }

  async fn insert_color_tags(&self, drafts: Vec<ColorTagDraft>) -> Result<Vec<ColorTag>> {
    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut rows = Vec::with_capacity(drafts.len());
        {
          let mut stmt =
            tx.prepare("INSERT INTO color_tags (id, hex, name) VALUES (?1, ?2, ?3)")?;
          for draft in drafts {
            stmt.execute(rusqlite::params![draft.id, draft.hex, draft.name])?;
            rows.push(ColorTag {
              id:   tx.last_insert_rowid(),
              hex:  draft.hex,
              name: draft.name,
            });
          }
        }
        tx.commit()?;
        Ok(rows)
      })
      .await?;

    debug!(count = inserted.len(), "inserted color tags");
    self.refresh_color_tags().await?;
    Ok(inserted)
  }
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

/// Insert-or-replace by primary key. A `NULL` id takes the next rowid.
const UPSERT_CONTACT: &str = "
INSERT INTO contacts (
  id, name, number, can_be_checked_off, is_checked_off, color_id, in_trash
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
ON CONFLICT(id) DO UPDATE SET
  name               = excluded.name,
  number             = excluded.number,
  can_be_checked_off = excluded.can_be_checked_off,
  is_checked_off     = excluded.is_checked_off,
  color_id           = excluded.color_id,
  in_trash           = excluded.in_trash";

const INSERT_CONTACT: &str = "
INSERT INTO contacts (
  id, name, number, can_be_checked_off, is_checked_off, color_id, in_trash
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

/// Execute `sql` for `draft` and return the persisted row.
fn write_contact(
  conn: &rusqlite::Connection,
  sql: &str,
  draft: ContactDraft,
) -> rusqlite::Result<Contact> {
  conn.execute(
    sql,
    rusqlite::params![
      draft.id,
      draft.name,
      draft.number,
      draft.can_be_checked_off,
      draft.is_checked_off,
      draft.color_tag_id,
      draft.is_in_trash,
    ],
  )?;
  // On the update path `last_insert_rowid` is stale, so prefer the given id.
  let id = draft.id.unwrap_or_else(|| conn.last_insert_rowid());
  Ok(Contact {
    id,
    name: draft.name,
    number: draft.number,
    can_be_checked_off: draft.can_be_checked_off,
    is_checked_off: draft.is_checked_off,
    color_tag_id: draft.color_tag_id,
    is_in_trash: draft.is_in_trash,
  })
}

impl ContactStore for SqliteStore {
  type Error = crate::Error;

  async fn list_contacts(&self) -> Result<Vec<Contact>> {
    let contacts = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY id"))?;
        let rows = stmt
          .query_map([], decode_contact)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(contacts)
  }

  async fn find_contact(&self, id: ContactId) -> Result<Option<Contact>> {
    let contact = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"),
              rusqlite::params![id],
              decode_contact,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(contact)
  }

  async fn contacts_by_ids(&self, ids: &[ContactId]) -> Result<Vec<Contact>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }
    let ids = ids.to_vec();

    let contacts = self
      .conn
      .call(move |conn| {
        let mut rows = Vec::new();
        for chunk in ids.chunks(MAX_IDS_PER_STATEMENT) {
          let sql = format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts WHERE id IN ({})",
            placeholders(chunk.len())
          );
          let mut stmt = conn.prepare(&sql)?;
          for row in stmt.query_map(rusqlite::params_from_iter(chunk), decode_contact)? {
            rows.push(row?);
          }
        }
        rows.sort_by_key(|c: &Contact| c.id);
        rows.dedup_by_key(|c| c.id);
        Ok(rows)
      })
      .await?;
    Ok(contacts)
  }

  async fn upsert_contact(&self, draft: ContactDraft) -> Result<Contact> {
    let contact = self
      .conn
      .call(move |conn| Ok(write_contact(conn, UPSERT_CONTACT, draft)?))
      .await?;
    debug!(id = contact.id, in_trash = contact.is_in_trash, "upserted contact");
    Ok(contact)
  }

  async fn insert_contacts(&self, drafts: Vec<ContactDraft>) -> Result<Vec<Contact>> {
    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let rows = drafts
          .into_iter()
          .map(|draft| write_contact(&tx, INSERT_CONTACT, draft))
          .collect::<rusqlite::Result<Vec<_>>>()?;
        tx.commit()?;
        Ok(rows)
      })
      .await?;
    debug!(count = inserted.len(), "inserted contacts");
    Ok(inserted)
  }

  async fn delete_contacts(&self, ids: &[ContactId]) -> Result<usize> {
    if ids.is_empty() {
      return Ok(0);
    }
    let ids = ids.to_vec();

    let removed = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut removed = 0;
        for chunk in ids.chunks(MAX_IDS_PER_STATEMENT) {
          let sql =
            format!("DELETE FROM contacts WHERE id IN ({})", placeholders(chunk.len()));
          removed += tx.execute(&sql, rusqlite::params_from_iter(chunk))?;
        }
        tx.commit()?;
        Ok(removed)
      })
      .await?;
    debug!(removed, "deleted contacts");
    Ok(removed)
  }
}
