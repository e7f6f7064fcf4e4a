//! Handlers for subreddit endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/subreddit/create` | Body: `{"name":"...","description":"..."}` |
//! | `POST` | `/subreddit/join` | Body: [`MembershipBody`] |
//! | `POST` | `/subreddit/leave` | Body: [`MembershipBody`]; no-op for non-members |
//! | `GET`  | `/subreddits/{name}` | Subreddit with members |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use forum_core::{model::Subreddit, store::ForumStore};
use serde::Deserialize;

use crate::{
  error::ApiError,
  response::{Envelope, success},
};

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub name:        String,
  #[serde(default)]
  pub description: String,
}

/// `POST /subreddit/create`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<CreateBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ForumStore,
{
  let Json(body) = body?;
  store
    .create_subreddit(body.name, body.description)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, success("Subreddit created successfully")))
}

// ─── Membership ───────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /subreddit/join` and `POST /subreddit/leave`.
#[derive(Debug, Deserialize)]
pub struct MembershipBody {
  pub username:  String,
  pub subreddit: String,
}

/// `POST /subreddit/join`
pub async fn join<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<MembershipBody>, JsonRejection>,
) -> Result<Json<Envelope<&'static str>>, ApiError>
where
  S: ForumStore,
{
  let Json(body) = body?;
  store
    .join_subreddit(body.username, body.subreddit)
    .await
    .map_err(ApiError::from_store)?;
  Ok(success("Subreddit joined successfully"))
}

/// `POST /subreddit/leave`
pub async fn leave<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<MembershipBody>, JsonRejection>,
) -> Result<Json<Envelope<&'static str>>, ApiError>
where
  S: ForumStore,
{
  let Json(body) = body?;
  store
    .leave_subreddit(body.username, body.subreddit)
    .await
    .map_err(ApiError::from_store)?;
  Ok(success("Subreddit left successfully"))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /subreddits/{name}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(name): Path<String>,
) -> Result<Json<Envelope<Subreddit>>, ApiError>
where
  S: ForumStore,
{
  let subreddit = store
    .get_subreddit(name.clone())
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("subreddit {name} not found")))?;
  Ok(success(subreddit))
}
