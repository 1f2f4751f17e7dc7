//! Handlers for the `/people` resource endpoints.
//!
//! | Method   | Path                | Notes |
//! |----------|---------------------|-------|
//! | `GET`    | `/people`           | Optional `?nome=` / `?cpf=` filters |
//! | `GET`    | `/people/{id}`      | 404 if not found |
//! | `POST`   | `/people` (v1)      | 201 + `Location` |
//! | `POST`   | `/people` (v2)      | 200; nested address validated, then dropped |
//! | `PUT`    | `/people/{id}` (v1) | Path and body ids must match; 204 |
//! | `DELETE` | `/people/{id}` (v1) | 204 |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::{StatusCode, header},
  response::IntoResponse,
};
use roster_core::{
  person::{NewPerson, Person, PersonId},
  store::{PersonFilter, PersonStore},
  validate::validate,
};
use roster_wire::{Decoded, PersonV1, PersonV2, WireInput};
use serde::Deserialize;

use crate::{AppState, auth::Authenticated, error::ApiError};

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub nome: Option<String>,
  pub cpf:  Option<String>,
}

/// `GET /people[?nome=&cpf=]`
pub async fn list<S>(
  _: Authenticated,
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Person>>, ApiError>
where
  S: PersonStore + Clone + Send + Sync + 'static,
{
  let filter = PersonFilter {
    name:        params.nome,
    national_id: params.cpf,
  };
  let people = state.store.list(&filter).await?;
  Ok(Json(people))
}

// ─── Read one ────────────────────────────────────────────────────────────────

/// `GET /people/{id}`
pub async fn get_one<S>(
  _: Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<PersonId>,
) -> Result<Json<Person>, ApiError>
where
  S: PersonStore + Clone + Send + Sync + 'static,
{
  let person = state
    .store
    .get(id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("person {id} not found")))?;
  Ok(Json(person))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /v1/people`
pub async fn create_v1<S>(
  _: Authenticated,
  State(state): State<AppState<S>>,
  Json(body): Json<PersonV1>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PersonStore + Clone + Send + Sync + 'static,
{
  let person = checked(WireInput::V1(body).decode())?;
  let created = state.store.insert(person).await?;

  let location = format!("/api/v1/people/{}", created.id);
  Ok((
    StatusCode::CREATED,
    [(header::LOCATION, location)],
    Json(created),
  ))
}

/// `POST /v2/people` — returns the stored record; the address from the
/// request is not part of it.
pub async fn create_v2<S>(
  _: Authenticated,
  State(state): State<AppState<S>>,
  Json(body): Json<PersonV2>,
) -> Result<Json<Person>, ApiError>
where
  S: PersonStore + Clone + Send + Sync + 'static,
{
  let had_address = body.address.is_some();
  let person = checked(WireInput::V2(body).decode())?;

  if had_address {
    // The canonical record has no address field; the validated address
    // does not survive past this point.
    tracing::warn!("v2 create: address accepted but not persisted");
  }

  let created = state.store.insert(person).await?;
  Ok(Json(created))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// `PUT /v1/people/{id}` — the path id and body id must match exactly.
pub async fn update<S>(
  _: Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<PersonId>,
  Json(body): Json<PersonV1>,
) -> Result<StatusCode, ApiError>
where
  S: PersonStore + Clone + Send + Sync + 'static,
{
  let decoded = WireInput::V1(body).decode();
  if decoded.body_id != Some(id) {
    return Err(ApiError::IdentityMismatch);
  }

  let person = checked(decoded)?;
  state.store.update(id, person).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /v1/people/{id}`
pub async fn delete_one<S>(
  _: Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<PersonId>,
) -> Result<StatusCode, ApiError>
where
  S: PersonStore + Clone + Send + Sync + 'static,
{
  state.store.delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Shared validation step ──────────────────────────────────────────────────

/// Run the full rule set over a decoded body: the core rules first, then
/// any wire-level findings (the v2 address checks). Everything is
/// reported together so the client sees all problems at once.
fn checked(decoded: Decoded) -> Result<NewPerson, ApiError> {
  let Decoded { draft, violations: wire_violations, .. } = decoded;
  match validate(draft) {
    Ok(person) if wire_violations.is_empty() => Ok(person),
    Ok(_) => Err(ApiError::Validation(wire_violations)),
    Err(mut violations) => {
      violations.extend(wire_violations);
      Err(ApiError::Validation(violations))
    }
  }
}
