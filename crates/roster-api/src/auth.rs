//! Bearer-token gate and the login endpoint that issues tokens.
//!
//! A single credential pair is configured per server instance. Login
//! verifies it against the stored argon2 hash and mints an HMAC-SHA256
//! token carrying a unique `jti` and a 3-hour expiry. Every resource
//! route extracts [`Authenticated`], which verifies the
//! `Authorization: Bearer` header before the handler body runs.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
  Json,
  extract::{FromRequestParts, State},
  http::{HeaderMap, request::Parts},
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use roster_core::store::PersonStore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// How long an issued token stays valid.
const TOKEN_TTL_HOURS: i64 = 3;

/// Credentials and signing material accepted as valid for this server
/// instance.
#[derive(Clone)]
pub struct AuthConfig {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
  /// HMAC secret used to sign and verify bearer tokens.
  pub token_secret:  String,
}

/// Claims carried by an issued token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
  pub sub: String,
  pub jti: String,
  pub exp: i64,
}

/// Zero-size marker: present in a handler means the request carried a
/// valid bearer token.
pub struct Authenticated;

/// Verify the `Authorization: Bearer` header against `config`.
pub fn verify_bearer(
  headers: &HeaderMap,
  config: &AuthConfig,
) -> Result<Claims, ApiError> {
  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  let token = header_val
    .strip_prefix("Bearer ")
    .ok_or(ApiError::Unauthorized)?;

  let decoded = jsonwebtoken::decode::<Claims>(
    token,
    &DecodingKey::from_secret(config.token_secret.as_bytes()),
    &Validation::default(),
  )
  .map_err(|_| ApiError::Unauthorized)?;

  Ok(decoded.claims)
}

impl<S> FromRequestParts<AppState<S>> for Authenticated
where
  S: PersonStore + Clone + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    verify_bearer(&parts.headers, &state.auth)?;
    Ok(Authenticated)
  }
}

// ─── Login ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub username: String,
  pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
  pub token:      String,
  pub expiration: DateTime<Utc>,
}

/// `POST /api/auth/login` — the only route outside the bearer gate.
pub async fn login<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<Json<TokenResponse>, ApiError>
where
  S: PersonStore + Clone + Send + Sync + 'static,
{
  if body.username != state.auth.username {
    return Err(ApiError::Unauthorized);
  }

  let parsed_hash = PasswordHash::new(&state.auth.password_hash)
    .map_err(|_| ApiError::Unauthorized)?;
  Argon2::default()
    .verify_password(body.password.as_bytes(), &parsed_hash)
    .map_err(|_| ApiError::Unauthorized)?;

  let expiration = Utc::now() + Duration::hours(TOKEN_TTL_HOURS);
  let claims = Claims {
    sub: body.username,
    jti: Uuid::new_v4().to_string(),
    exp: expiration.timestamp(),
  };

  let token = jsonwebtoken::encode(
    &Header::default(),
    &claims,
    &EncodingKey::from_secret(state.auth.token_secret.as_bytes()),
  )
  .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(user = %claims.sub, "issued bearer token");
  Ok(Json(TokenResponse { token, expiration }))
}
