//! The v2 wire shape — the v1 fields plus a required nested address.
//!
//! The address is accepted and validated, but the canonical record has no
//! storage field for it, so it is dropped after validation and never
//! echoed back in responses.

use chrono::NaiveDate;
use roster_core::{
  person::{PersonDraft, PersonId},
  validate::Violation,
};
use serde::Deserialize;

use crate::Decoded;

/// Body of `POST /api/v2/people`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonV2 {
  #[serde(default)]
  pub id:          Option<PersonId>,
  #[serde(default)]
  pub full_name:   String,
  #[serde(default)]
  pub national_id: String,
  pub birth_date:  Option<NaiveDate>,
  pub email:       Option<String>,
  pub sex:         Option<String>,
  pub birthplace:  Option<String>,
  pub nationality: Option<String>,
  /// Required in v2; validated, then discarded.
  pub address:     Option<Address>,
}

/// The nested v2 address. Missing sub-fields decode as empty strings so
/// they surface as field violations rather than decode failures;
/// `complement` is the only optional one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
  #[serde(default)]
  pub street:      String,
  #[serde(default)]
  pub number:      String,
  pub complement:  Option<String>,
  #[serde(default)]
  pub district:    String,
  #[serde(default)]
  pub city:        String,
  #[serde(default)]
  pub state:       String,
  #[serde(default)]
  pub postal_code: String,
}

impl PersonV2 {
  pub fn decode(self) -> Decoded {
    let violations = address_violations(self.address.as_ref());
    Decoded {
      body_id: self.id,
      draft: PersonDraft {
        full_name: self.full_name,
        national_id: self.national_id,
        birth_date: self.birth_date,
        email: self.email,
        sex: self.sex,
        birthplace: self.birthplace,
        nationality: self.nationality,
      },
      violations,
    }
  }
}

/// The v2-only address rules: the address must be present with every
/// required sub-field non-empty.
fn address_violations(address: Option<&Address>) -> Vec<Violation> {
  let Some(address) = address else {
    return vec![Violation::new("address", "address is required")];
  };

  let required = [
    ("address.street", &address.street),
    ("address.number", &address.number),
    ("address.district", &address.district),
    ("address.city", &address.city),
    ("address.state", &address.state),
    ("address.postalCode", &address.postal_code),
  ];

  required
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| Violation::new(field, format!("{field} must not be empty")))
    .collect()
}
