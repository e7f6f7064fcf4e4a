//! Handlers for user endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/register` | Body: `{"username":"..."}`; 409 if taken |
//! | `GET`  | `/users/{username}` | User with inbox; 404 if unknown |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use forum_core::{model::User, store::ForumStore};
use serde::Deserialize;

use crate::{
  error::ApiError,
  response::{Envelope, success},
};

// ─── Register ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
  pub username: String,
}

/// `POST /register`. Body: `{"username":"alice"}`
pub async fn register<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<RegisterBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ForumStore,
{
  let Json(body) = body?;
  store
    .register_user(body.username)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, success("User registered successfully")))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /users/{username}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(username): Path<String>,
) -> Result<Json<Envelope<User>>, ApiError>
where
  S: ForumStore,
{
  let user = store
    .get_user(username.clone())
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("user {username} not found")))?;
  Ok(success(user))
}
