//! The flat v1 wire shape. Fields map 1:1 onto the canonical record.

use chrono::NaiveDate;
use roster_core::person::{PersonDraft, PersonId};
use serde::Deserialize;

use crate::Decoded;

/// Body of `POST /api/v1/people` and `PUT /api/v1/people/{id}`.
///
/// Server-assigned fields (`registeredAt`, `updatedAt`) have no
/// counterpart here, so a client can never set them. Required text fields
/// default to empty strings: their absence is a validation finding, not a
/// decode failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonV1 {
  /// Present on updates, where it must match the path id.
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
}

impl PersonV1 {
  pub fn decode(self) -> Decoded {
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
      violations: Vec::new(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decodes_camel_case_fields() {
    let body: PersonV1 = serde_json::from_value(serde_json::json!({
      "fullName": "Ana Silva",
      "nationalId": "111.111.111-11",
      "birthDate": "2000-01-01",
      "email": "ana@example.com"
    }))
    .unwrap();

    let decoded = body.decode();
    assert_eq!(decoded.body_id, None);
    assert_eq!(decoded.draft.full_name, "Ana Silva");
    assert_eq!(decoded.draft.national_id, "111.111.111-11");
    assert_eq!(
      decoded.draft.birth_date,
      NaiveDate::from_ymd_opt(2000, 1, 1)
    );
    assert!(decoded.violations.is_empty());
  }

  #[test]
  fn server_assigned_fields_are_ignored() {
    // Clients cannot smuggle timestamps in; unknown keys are dropped.
    let body: PersonV1 = serde_json::from_value(serde_json::json!({
      "fullName": "Ana Silva",
      "nationalId": "11111111111",
      "birthDate": "2000-01-01",
      "registeredAt": "1999-01-01T00:00:00Z",
      "updatedAt": "1999-01-01T00:00:00Z"
    }))
    .unwrap();
    assert_eq!(body.full_name, "Ana Silva");
  }

  #[test]
  fn missing_required_fields_decode_as_empty() {
    let body: PersonV1 = serde_json::from_value(serde_json::json!({})).unwrap();
    let decoded = body.decode();
    assert_eq!(decoded.draft.full_name, "");
    assert_eq!(decoded.draft.birth_date, None);
  }

  #[test]
  fn body_id_is_carried_through() {
    let body: PersonV1 = serde_json::from_value(serde_json::json!({
      "id": 7,
      "fullName": "Ana Silva",
      "nationalId": "11111111111",
      "birthDate": "2000-01-01"
    }))
    .unwrap();
    assert_eq!(body.decode().body_id, Some(7));
  }
}
