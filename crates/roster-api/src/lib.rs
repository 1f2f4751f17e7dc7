//! JSON REST API and composition root for the Roster person registry.
//!
//! Exposes an axum [`Router`] backed by any [`PersonStore`]. Requests are
//! version-dispatched at the router: `/api/v1` carries the full resource
//! surface, `/api/v2` serves reads plus the richer create shape, and the
//! unversioned `/api` paths alias v1. Every `/people` route sits behind
//! the bearer gate in [`auth`]; `/api/auth/login` is the only open route.

pub mod auth;
pub mod error;
pub mod people;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use roster_core::store::PersonStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::AuthConfig;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:               String,
  pub port:               u16,
  pub store_path:         PathBuf,
  pub auth_username:      String,
  pub auth_password_hash: String,
  pub token_secret:       String,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: PersonStore> {
  pub store: Arc<S>,
  pub auth:  Arc<AuthConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised router for `state`.
///
/// Unrecognized version segments (`/api/v3/...`) match nothing and fall
/// through to the router's 404.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: PersonStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/api/auth/login", post(auth::login::<S>))
    // v1 — the full resource surface.
    .route(
      "/api/v1/people",
      get(people::list::<S>).post(people::create_v1::<S>),
    )
    .route(
      "/api/v1/people/{id}",
      get(people::get_one::<S>)
        .put(people::update::<S>)
        .delete(people::delete_one::<S>),
    )
    // v2 — reads plus the create shape with a nested address.
    .route(
      "/api/v2/people",
      get(people::list::<S>).post(people::create_v2::<S>),
    )
    .route("/api/v2/people/{id}", get(people::get_one::<S>))
    // An unversioned path defaults to v1.
    .route(
      "/api/people",
      get(people::list::<S>).post(people::create_v1::<S>),
    )
    .route(
      "/api/people/{id}",
      get(people::get_one::<S>)
        .put(people::update::<S>)
        .delete(people::delete_one::<S>),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
