//! The [`PersonStore`] trait and its query type.
//!
//! The trait is implemented by storage backends (e.g.
//! `roster-store-sqlite`). The HTTP layer depends on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::{
  error::Error,
  person::{NewPerson, Person, PersonId},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Optional filters for [`PersonStore::list`]. Both filters combine; an
/// empty filter returns every record.
#[derive(Debug, Clone, Default)]
pub struct PersonFilter {
  /// Case-insensitive substring over the full name.
  pub name:        Option<String>,
  /// Substring over the normalized national-id digit string.
  pub national_id: Option<String>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a person registry backend.
///
/// Uniqueness of the normalized national id is part of this contract:
/// `insert` and `update` fail with [`Error::DuplicateNationalId`] rather
/// than ever storing a second record with the same key, and the check is
/// atomic with the write — concurrent writers with the same key cannot
/// both succeed.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait PersonStore: Send + Sync {
  /// All live records matching `filter`, in insertion order.
  fn list<'a>(
    &'a self,
    filter: &'a PersonFilter,
  ) -> impl Future<Output = Result<Vec<Person>, Error>> + Send + 'a;

  /// A single record by id. Returns `None` if not found.
  fn get(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<Option<Person>, Error>> + Send + '_;

  /// Persist `person` under a fresh id, stamping both timestamps to the
  /// current time.
  fn insert(
    &self,
    person: NewPerson,
  ) -> impl Future<Output = Result<Person, Error>> + Send + '_;

  /// Overwrite every mutable field of record `id` and re-stamp
  /// `updated_at`. `id` and `registered_at` are left untouched.
  fn update(
    &self,
    id: PersonId,
    person: NewPerson,
  ) -> impl Future<Output = Result<Person, Error>> + Send + '_;

  /// Remove record `id` permanently.
  fn delete(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<(), Error>> + Send + '_;
}
