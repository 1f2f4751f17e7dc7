//! Mapping from database failures into the registry error taxonomy.

use roster_core::Error;

/// A `SQLITE_CONSTRAINT` failure on a write means the unique index on the
/// normalized national id rejected it — the only constraint a caller can
/// violate. Everything else is an opaque storage error.
pub(crate) fn map_db_error(err: tokio_rusqlite::Error) -> Error {
  match err {
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))
      if e.code == rusqlite::ErrorCode::ConstraintViolation =>
    {
      Error::DuplicateNationalId
    }
    other => Error::storage(other),
  }
}
