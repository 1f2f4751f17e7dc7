//! The canonical person record and its pre-validation forms.
//!
//! `Person` is the single internal representation of a registered person,
//! independent of wire version. Wire decoding produces a [`PersonDraft`];
//! the validation pipeline promotes a draft to a [`NewPerson`], which is
//! the only shape a store will persist.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Surrogate key assigned by the store on creation; never reused or
/// mutated afterwards.
pub type PersonId = i64;

/// The canonical, persisted person record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
  pub id:            PersonId,
  pub full_name:     String,
  /// Natural key. Stored as given by the client; uniqueness is enforced
  /// on the normalized form (see [`national_id_digits`]).
  pub national_id:   String,
  pub birth_date:    NaiveDate,
  pub email:         Option<String>,
  pub sex:           Option<String>,
  pub birthplace:    Option<String>,
  pub nationality:   Option<String>,
  /// Server-assigned; set once on creation.
  pub registered_at: DateTime<Utc>,
  /// Server-assigned; re-stamped on every successful update. Always at
  /// or after `registered_at`.
  pub updated_at:    DateTime<Utc>,
}

/// A candidate record as decoded from a wire shape, before validation.
///
/// `birth_date` is optional here so that an absent date surfaces as a
/// field violation rather than a decode failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonDraft {
  pub full_name:   String,
  pub national_id: String,
  pub birth_date:  Option<NaiveDate>,
  pub email:       Option<String>,
  pub sex:         Option<String>,
  pub birthplace:  Option<String>,
  pub nationality: Option<String>,
}

/// A validated payload, ready for persistence.
///
/// The validation pipeline promotes a [`PersonDraft`] into one of these;
/// by then `birth_date` is known to be present and every field rule has
/// passed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPerson {
  pub full_name:   String,
  pub national_id: String,
  pub birth_date:  NaiveDate,
  pub email:       Option<String>,
  pub sex:         Option<String>,
  pub birthplace:  Option<String>,
  pub nationality: Option<String>,
}

impl NewPerson {
  /// The normalized natural key for this payload.
  pub fn national_id_digits(&self) -> String {
    national_id_digits(&self.national_id)
  }
}

/// Strip every non-digit character from a national id.
///
/// Formatting characters are ignored, not rejected: `111.111.111-11` and
/// `11111111111` normalize to the same key.
pub fn national_id_digits(raw: &str) -> String {
  raw.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn formatting_characters_are_stripped() {
    assert_eq!(national_id_digits("111.111.111-11"), "11111111111");
    assert_eq!(national_id_digits("11111111111"), "11111111111");
  }

  #[test]
  fn non_digits_only_normalizes_to_empty() {
    assert_eq!(national_id_digits("abc-./"), "");
  }
}
