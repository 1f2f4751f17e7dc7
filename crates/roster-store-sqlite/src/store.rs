//! [`SqliteStore`] — the SQLite implementation of [`PersonStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use roster_core::{
  error::{Error, Result},
  person::{NewPerson, Person, PersonId},
  store::{PersonFilter, PersonStore},
};

use crate::{
  encode::{COLUMNS, RawPerson, encode_date, encode_dt},
  error::map_db_error,
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A person registry backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All
/// statements for one logical operation run inside a single
/// [`tokio_rusqlite::Connection::call`] closure, and the duplicate-key
/// check is the unique index itself, so there is no window in which two
/// writers holding the same normalized national id can both succeed.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(map_db_error)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(map_db_error)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(map_db_error)
  }
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  async fn list(&self, filter: &PersonFilter) -> Result<Vec<Person>> {
    let name_pattern = filter.name.as_deref().map(|n| format!("%{n}%"));
    let digit_pattern =
      filter.national_id.as_deref().map(|d| format!("%{d}%"));

    let raws: Vec<RawPerson> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {COLUMNS} FROM people
           WHERE (?1 IS NULL OR full_name LIKE ?1)
             AND (?2 IS NULL OR national_id_digits LIKE ?2)
           ORDER BY id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params![name_pattern, digit_pattern],
            RawPerson::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(map_db_error)?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }

  async fn get(&self, id: PersonId) -> Result<Option<Person>> {
    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {COLUMNS} FROM people WHERE id = ?1"),
              rusqlite::params![id],
              RawPerson::from_row,
            )
            .optional()?,
        )
      })
      .await
      .map_err(map_db_error)?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn insert(&self, person: NewPerson) -> Result<Person> {
    let now = Utc::now();
    let digits = person.national_id_digits();
    let birth_str = encode_date(person.birth_date);
    let now_str = encode_dt(now);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO people (
             full_name, national_id, national_id_digits, birth_date,
             email, sex, birthplace, nationality, registered_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            person.full_name,
            person.national_id,
            digits,
            birth_str,
            person.email,
            person.sex,
            person.birthplace,
            person.nationality,
            now_str,
            now_str,
          ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(Person {
          id,
          full_name: person.full_name,
          national_id: person.national_id,
          birth_date: person.birth_date,
          email: person.email,
          sex: person.sex,
          birthplace: person.birthplace,
          nationality: person.nationality,
          registered_at: now,
          updated_at: now,
        })
      })
      .await
      .map_err(map_db_error)
  }

  async fn update(&self, id: PersonId, person: NewPerson) -> Result<Person> {
    let now = Utc::now();
    let digits = person.national_id_digits();
    let birth_str = encode_date(person.birth_date);
    let now_str = encode_dt(now);

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        let updated = conn.execute(
          "UPDATE people SET
             full_name = ?1, national_id = ?2, national_id_digits = ?3,
             birth_date = ?4, email = ?5, sex = ?6, birthplace = ?7,
             nationality = ?8, updated_at = ?9
           WHERE id = ?10",
          rusqlite::params![
            person.full_name,
            person.national_id,
            digits,
            birth_str,
            person.email,
            person.sex,
            person.birthplace,
            person.nationality,
            now_str,
            id,
          ],
        )?;
        if updated == 0 {
          return Ok(None);
        }
        Ok(
          conn
            .query_row(
              &format!("SELECT {COLUMNS} FROM people WHERE id = ?1"),
              rusqlite::params![id],
              RawPerson::from_row,
            )
            .optional()?,
        )
      })
      .await
      .map_err(map_db_error)?;

    raw.ok_or(Error::NotFound(id))?.into_person()
  }

  async fn delete(&self, id: PersonId) -> Result<()> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM people WHERE id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await
      .map_err(map_db_error)?;

    if removed == 0 {
      return Err(Error::NotFound(id));
    }
    Ok(())
  }
}
