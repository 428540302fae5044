//! Subcommands and their output.

use anyhow::{Context as _, Result, bail};
use clap::Subcommand;
use phonebook_core::{
  color_tag::{ColorTagId, ColorTagView},
  contact::{ContactId, ContactView, sort_for_display},
};
use phonebook_repository::Repository;
use phonebook_store_sqlite::SqliteStore;
use serde::Serialize;

// ─── Command ──────────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum Command {
  /// List contacts that are not in the trash, sorted by name.
  List,
  /// List contacts in the trash.
  Trash,
  /// List the available color tags.
  Tags,
  /// Show one contact.
  Show { id: ContactId },
  /// Create a contact.
  Add {
    #[arg(long)]
    name:      String,
    #[arg(long)]
    number:    String,
    /// Color tag id; a random tag is picked when omitted.
    #[arg(long)]
    tag:       Option<ColorTagId>,
    /// Give the contact a check box.
    #[arg(long)]
    checkable: bool,
  },
  /// Change a contact. Saving a contact from the trash restores it.
  Edit {
    id:            ContactId,
    #[arg(long)]
    name:          Option<String>,
    #[arg(long)]
    number:        Option<String>,
    #[arg(long)]
    tag:           Option<ColorTagId>,
    #[arg(long, conflicts_with = "not_checkable")]
    checkable:     bool,
    #[arg(long)]
    not_checkable: bool,
  },
  /// Tick a checkable contact.
  Check { id: ContactId },
  /// Untick a checkable contact.
  Uncheck { id: ContactId },
  /// Move a contact to the trash.
  Remove { id: ContactId },
  /// Bring contacts back from the trash.
  Restore {
    #[arg(required = true)]
    ids: Vec<ContactId>,
  },
  /// Permanently delete contacts.
  Delete {
    #[arg(required = true)]
    ids: Vec<ContactId>,
  },
  /// Permanently delete everything in the trash.
  Purge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
  Text,
  Json,
}

// ─── Dispatch ─────────────────────────────────────────────────────────────────

pub async fn run(
  repo: &Repository<SqliteStore>,
  command: Command,
  format: Format,
) -> Result<()> {
  match command {
    Command::List => {
      let mut contacts = snapshot(repo.active_contacts().latest());
      sort_for_display(&mut contacts);
      print_contacts(&contacts, format)
    }

    Command::Trash => print_contacts(&snapshot(repo.trashed_contacts().latest()), format),

    Command::Tags => {
      let tags = color_tags(repo).await?;
      match format {
        Format::Json => print_json(&tags),
        Format::Text => {
          for tag in &tags {
            println!("{:>4}  {}  {}", tag.id, tag.hex, tag.name);
          }
          Ok(())
        }
      }
    }

    Command::Show { id } => {
      let contact = repo.find_contact(id).await?;
      match format {
        Format::Json => print_json(&contact),
        Format::Text => {
          println!("{}", render_detail(&contact));
          Ok(())
        }
      }
    }

    Command::Add { name, number, tag, checkable } => {
      let mut contact = repo.blank_contact().await?;
      contact.name = name;
      contact.number = number;
      contact.is_checked_off = checkable.then_some(false);
      if let Some(id) = tag {
        contact.color_tag = color_tag(repo, id).await?;
      }
      repo.insert_contact(contact.clone()).await?;
      report(format, "saved", &contact.name)
    }

    Command::Edit { id, name, number, tag, checkable, not_checkable } => {
      let mut contact = repo.find_contact(id).await?;
      if let Some(name) = name {
        contact.name = name;
      }
      if let Some(number) = number {
        contact.number = number;
      }
      if let Some(tag) = tag {
        contact.color_tag = color_tag(repo, tag).await?;
      }
      if checkable && contact.is_checked_off.is_none() {
        contact.is_checked_off = Some(false);
      }
      if not_checkable {
        contact.is_checked_off = None;
      }
      repo.insert_contact(contact.clone()).await?;
      report(format, "saved", &contact.name)
    }

    Command::Check { id } => {
      repo.set_checked_off(id, true).await?;
      report(format, "checked", &id.to_string())
    }

    Command::Uncheck { id } => {
      repo.set_checked_off(id, false).await?;
      report(format, "unchecked", &id.to_string())
    }

    Command::Remove { id } => {
      repo
        .move_to_trash(id)
        .await
        .with_context(|| format!("cannot move contact {id} to trash"))?;
      report(format, "trashed", &id.to_string())
    }

    Command::Restore { ids } => {
      let label = join_ids(&ids);
      repo.restore_from_trash(ids).await?;
      report(format, "restored", &label)
    }

    Command::Delete { ids } => {
      let label = join_ids(&ids);
      repo.delete_contacts(ids).await?;
      report(format, "deleted", &label)
    }

    Command::Purge => {
      let ids: Vec<_> = snapshot(repo.trashed_contacts().latest())
        .iter()
        .map(|c| c.id)
        .collect();
      if ids.is_empty() {
        return report(format, "purged", "nothing");
      }
      let label = join_ids(&ids);
      repo.delete_contacts(ids).await?;
      report(format, "purged", &label)
    }
  }
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Copy a published snapshot; the repository has always published by the
/// time a command runs.
fn snapshot<T: Clone>(snap: phonebook_core::feed::Snapshot<T>) -> Vec<T> {
  snap.map(|list| list.as_ref().clone()).unwrap_or_default()
}

async fn color_tags(repo: &Repository<SqliteStore>) -> Result<Vec<ColorTagView>> {
  let mut sub = repo.color_tags();
  let tags = sub.first().await.context("color tags unavailable")?;
  Ok(tags.as_ref().clone())
}

async fn color_tag(repo: &Repository<SqliteStore>, id: ColorTagId) -> Result<ColorTagView> {
  match color_tags(repo).await?.into_iter().find(|t| t.id == id) {
    Some(tag) => Ok(tag),
    None => bail!("unknown color tag {id}; see `phonebook tags`"),
  }
}

fn join_ids(ids: &[ContactId]) -> String {
  ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

#[derive(Serialize)]
struct Outcome<'a> {
  action: &'a str,
  target: &'a str,
}

fn report(format: Format, action: &str, target: &str) -> Result<()> {
  match format {
    Format::Json => print_json(&Outcome { action, target }),
    Format::Text => {
      println!("{action}: {target}");
      Ok(())
    }
  }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
  let out = serde_json::to_string_pretty(value).context("serializing output")?;
  println!("{out}");
  Ok(())
}

fn print_contacts(contacts: &[ContactView], format: Format) -> Result<()> {
  match format {
    Format::Json => print_json(contacts),
    Format::Text => {
      for contact in contacts {
        println!("{}", render_row(contact));
      }
      Ok(())
    }
  }
}

fn check_box(state: Option<bool>) -> &'static str {
  match state {
    Some(true) => "[x]",
    Some(false) => "[ ]",
    None => "   ",
  }
}

/// One line of a contact list.
fn render_row(c: &ContactView) -> String {
  format!(
    "{:>4} {} {:<24} {:<14} {}",
    c.id,
    check_box(c.is_checked_off),
    c.name.trim(),
    c.number,
    c.color_tag.name
  )
  .trim_end()
  .to_owned()
}

fn render_detail(c: &ContactView) -> String {
  let mut out = format!(
    "#{}  {}\nnumber: {}\ntag:    {} ({})",
    c.id, c.name, c.number, c.color_tag.name, c.color_tag.hex
  );
  if let Some(checked) = c.is_checked_off {
    out.push_str(&format!("\nchecked off: {}", if checked { "yes" } else { "no" }));
  }
  out
}
