//! Version-specific wire shapes for the Roster HTTP API.
//!
//! Two wire representations of the same logical entity exist: the flat v1
//! shape and the v2 shape with a nested address. Both decode into the one
//! canonical [`PersonDraft`] before any business logic runs; responses
//! always serialize the canonical record directly, whatever version the
//! request used.

pub mod v1;
pub mod v2;

pub use v1::PersonV1;
pub use v2::{Address, PersonV2};

use roster_core::{
  person::{PersonDraft, PersonId},
  validate::Violation,
};

/// A version-tagged request body, as received at the HTTP boundary.
#[derive(Debug, Clone)]
pub enum WireInput {
  V1(PersonV1),
  V2(PersonV2),
}

/// The outcome of decoding a wire shape into canonical form.
#[derive(Debug, Clone)]
pub struct Decoded {
  /// The version-agnostic candidate record.
  pub draft:      PersonDraft,
  /// The id carried in the body, if the shape carries one (v1 updates).
  pub body_id:    Option<PersonId>,
  /// Wire-level findings — the v2 address checks. The address itself is
  /// validated and then dropped: the canonical record has no field for it.
  pub violations: Vec<Violation>,
}

impl WireInput {
  /// Map the wire fields onto the canonical draft.
  pub fn decode(self) -> Decoded {
    match self {
      WireInput::V1(body) => body.decode(),
      WireInput::V2(body) => body.decode(),
    }
  }
}
