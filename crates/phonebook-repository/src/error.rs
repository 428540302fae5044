//! Error type for `phonebook-repository`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Not-found, not-checkable, and referential-integrity conditions.
  #[error(transparent)]
  Core(#[from] phonebook_core::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("repository initialization failed: {0}")]
  Init(String),

  /// The worker task is gone; the operation was never applied.
  #[error("repository worker has stopped")]
  Closed,
}

impl Error {
  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::Core(phonebook_core::Error::ContactNotFound(_)))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Box a backend error.
pub(crate) fn store_err<E>(e: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  Error::Store(Box::new(e))
}
