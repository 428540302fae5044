//! SQL schema for the phonebook SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema revision for future migrations.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `contacts.color_id` deliberately carries no foreign key: a dangling
/// reference is detected when contacts are joined with their color tags.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS color_tags (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    hex   TEXT NOT NULL,     -- e.g. '#9E9E9E'
    name  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS contacts (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    name                TEXT    NOT NULL,
    number              TEXT    NOT NULL,
    can_be_checked_off  INTEGER NOT NULL DEFAULT 0,
    is_checked_off      INTEGER NOT NULL DEFAULT 0,
    color_id            INTEGER NOT NULL,
    in_trash            INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS contacts_trash_idx ON contacts(in_trash);

PRAGMA user_version = 1;
";
