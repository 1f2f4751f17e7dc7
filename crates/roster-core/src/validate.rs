//! The validation pipeline — an ordered set of independent, pure rules.
//!
//! Every rule runs on every call (no short-circuiting) so a caller sees
//! the full set of problems at once. A clean pass promotes the draft to a
//! [`NewPerson`].

use std::sync::LazyLock;

use chrono::{Months, NaiveDate, Utc};
use regex::Regex;
use serde::Serialize;

use crate::person::{NewPerson, PersonDraft, national_id_digits};

/// Maximum plausible age, in years.
const MAX_AGE_YEARS: u32 = 120;

static EMAIL: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("email pattern"));

/// A single field-level finding, reported to the caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
  pub field:   String,
  pub message: String,
}

impl Violation {
  pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self { field: field.into(), message: message.into() }
  }
}

type Rule = fn(&PersonDraft) -> Vec<Violation>;

/// The full rule set, in reporting order.
const RULES: &[Rule] =
  &[full_name_present, national_id_shape, birth_date_window, email_syntax];

/// Run every rule over `draft` and union the findings; on a clean pass,
/// promote the draft to a [`NewPerson`].
pub fn validate(draft: PersonDraft) -> Result<NewPerson, Vec<Violation>> {
  let violations: Vec<Violation> =
    RULES.iter().flat_map(|rule| rule(&draft)).collect();

  match draft.birth_date {
    Some(birth_date) if violations.is_empty() => Ok(NewPerson {
      full_name: draft.full_name,
      national_id: draft.national_id,
      birth_date,
      email: draft.email,
      sex: draft.sex,
      birthplace: draft.birthplace,
      nationality: draft.nationality,
    }),
    // An absent birth date always carries its own violation, so this arm
    // never returns an empty set.
    _ => Err(violations),
  }
}

// ─── Rules ───────────────────────────────────────────────────────────────────

fn full_name_present(draft: &PersonDraft) -> Vec<Violation> {
  if draft.full_name.trim().is_empty() {
    vec![Violation::new("fullName", "full name must not be empty")]
  } else {
    vec![]
  }
}

fn national_id_shape(draft: &PersonDraft) -> Vec<Violation> {
  if draft.national_id.trim().is_empty() {
    return vec![Violation::new("nationalId", "national id must not be empty")];
  }
  if national_id_digits(&draft.national_id).len() != 11 {
    return vec![Violation::new(
      "nationalId",
      "national id must contain exactly 11 digits",
    )];
  }
  vec![]
}

fn birth_date_window(draft: &PersonDraft) -> Vec<Violation> {
  let Some(birth_date) = draft.birth_date else {
    return vec![Violation::new("birthDate", "birth date is required")];
  };

  let today = Utc::now().date_naive();
  if birth_date > today {
    return vec![Violation::new(
      "birthDate",
      "birth date must not be in the future",
    )];
  }
  if birth_date < oldest_allowed(today) {
    return vec![Violation::new(
      "birthDate",
      format!("birth date implies an age over {MAX_AGE_YEARS} years"),
    )];
  }
  vec![]
}

/// The earliest acceptable birth date as of `today` (inclusive).
fn oldest_allowed(today: NaiveDate) -> NaiveDate {
  today
    .checked_sub_months(Months::new(MAX_AGE_YEARS * 12))
    .unwrap_or(NaiveDate::MIN)
}

fn email_syntax(draft: &PersonDraft) -> Vec<Violation> {
  match &draft.email {
    Some(email) if !EMAIL.is_match(email) => {
      vec![Violation::new("email", "email address is not valid")]
    }
    _ => vec![],
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
