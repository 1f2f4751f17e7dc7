//! Error types for `roster-core`.

use thiserror::Error;

use crate::person::PersonId;

#[derive(Debug, Error)]
pub enum Error {
  /// No live record is addressed by this id.
  #[error("person not found: {0}")]
  NotFound(PersonId),

  /// Another live record already holds this normalized national id.
  #[error("national id already registered")]
  DuplicateNationalId,

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend failure that carries no registry meaning of its own.
  pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Storage(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
