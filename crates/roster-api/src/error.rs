//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use roster_core::{Error as CoreError, validate::Violation};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("unauthorized")]
  Unauthorized,

  #[error("not found: {0}")]
  NotFound(String),

  /// Path and body ids disagree on an update — a client error distinct
  /// from `NotFound`, reported regardless of whether the body id exists.
  #[error("path id and body id do not match")]
  IdentityMismatch,

  /// One or more field-level findings, surfaced verbatim.
  #[error("validation failed")]
  Validation(Vec<Violation>),

  #[error("national id already registered")]
  DuplicateNationalId,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<CoreError> for ApiError {
  fn from(err: CoreError) -> Self {
    match err {
      CoreError::NotFound(id) => {
        ApiError::NotFound(format!("person {id} not found"))
      }
      CoreError::DuplicateNationalId => ApiError::DuplicateNationalId,
      CoreError::Storage(e) => ApiError::Store(e),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::Unauthorized => {
        let mut res = (
          StatusCode::UNAUTHORIZED,
          Json(json!({ "error": "unauthorized" })),
        )
          .into_response();
        res
          .headers_mut()
          .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        res
      }
      ApiError::NotFound(m) => {
        (StatusCode::NOT_FOUND, Json(json!({ "error": m }))).into_response()
      }
      ApiError::IdentityMismatch => (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "path id and body id do not match" })),
      )
        .into_response(),
      ApiError::Validation(violations) => (
        StatusCode::BAD_REQUEST,
        Json(json!({ "errors": violations })),
      )
        .into_response(),
      ApiError::DuplicateNationalId => (
        StatusCode::BAD_REQUEST,
        Json(json!({
          "error":
            "this national id is already registered; to edit, target the existing record"
        })),
      )
        .into_response(),
      ApiError::Store(e) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
      )
        .into_response(),
    }
  }
}
