//! The phonebook repository.
//!
//! [`Repository`] sits between a storage backend and its consumers. It owns
//! three observable collections (active contacts, trashed contacts, color
//! tags) and rebuilds the contact collections from scratch after every
//! mutation. Mutations are applied one at a time by a single worker task.

mod completion;
mod repository;
mod worker;

pub mod config;
pub mod error;

pub use completion::Completion;
pub use config::RepositoryConfig;
pub use error::{Error, Result};
pub use repository::{InitState, Repository};

#[cfg(test)]
mod tests;
