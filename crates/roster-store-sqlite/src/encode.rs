//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, birth dates as ISO 8601
//! calendar dates.

use chrono::{DateTime, NaiveDate, Utc};
use roster_core::{Error, person::Person};

/// The `people` columns a [`RawPerson`] is read from, in order.
pub const COLUMNS: &str = "id, full_name, national_id, birth_date, email, \
                           sex, birthplace, nationality, registered_at, \
                           updated_at";

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>, Error> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(Error::storage)
}

pub fn encode_date(d: NaiveDate) -> String { d.to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate, Error> {
  s.parse().map_err(Error::storage)
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw values read directly from a `people` row.
pub struct RawPerson {
  pub id:            i64,
  pub full_name:     String,
  pub national_id:   String,
  pub birth_date:    String,
  pub email:         Option<String>,
  pub sex:           Option<String>,
  pub birthplace:    Option<String>,
  pub nationality:   Option<String>,
  pub registered_at: String,
  pub updated_at:    String,
}

impl RawPerson {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id: row.get(0)?,
      full_name: row.get(1)?,
      national_id: row.get(2)?,
      birth_date: row.get(3)?,
      email: row.get(4)?,
      sex: row.get(5)?,
      birthplace: row.get(6)?,
      nationality: row.get(7)?,
      registered_at: row.get(8)?,
      updated_at: row.get(9)?,
    })
  }

  pub fn into_person(self) -> Result<Person, Error> {
    Ok(Person {
      id:            self.id,
      full_name:     self.full_name,
      national_id:   self.national_id,
      birth_date:    decode_date(&self.birth_date)?,
      email:         self.email,
      sex:           self.sex,
      birthplace:    self.birthplace,
      nationality:   self.nationality,
      registered_at: decode_dt(&self.registered_at)?,
      updated_at:    decode_dt(&self.updated_at)?,
    })
  }
}
