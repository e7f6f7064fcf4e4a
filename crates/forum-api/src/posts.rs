//! Handlers for post and comment endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/post/create` | Body: [`NewPostBody`]; returns 201 + `{"id":...}` |
//! | `GET`  | `/posts/{id}` | Post with vote counters |
//! | `GET`  | `/posts/{id}/comments` | Comments in creation order |
//! | `POST` | `/comment/create` | Body: [`NewCommentBody`]; returns 201 + `{"id":...}` |
//! | `GET`  | `/comments/{id}` | Single comment |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use forum_core::{
  model::{Comment, NewComment, NewPost, Post},
  store::ForumStore,
};
use serde::Deserialize;

use crate::{
  error::ApiError,
  response::{Created, Envelope, success},
};

// ─── Posts ────────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /post/create`.
#[derive(Debug, Deserialize)]
pub struct NewPostBody {
  pub title:     String,
  #[serde(default)]
  pub content:   String,
  pub author:    String,
  pub subreddit: String,
}

impl From<NewPostBody> for NewPost {
  fn from(b: NewPostBody) -> Self {
    NewPost {
      title:     b.title,
      content:   b.content,
      author:    b.author,
      subreddit: b.subreddit,
    }
  }
}

/// `POST /post/create`. Answers 201 with the generated post id.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<NewPostBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ForumStore,
{
  let Json(body) = body?;
  let post = store
    .create_post(NewPost::from(body))
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, success(Created { id: post.id })))
}

/// `GET /posts/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Envelope<Post>>, ApiError>
where
  S: ForumStore,
{
  let post = store
    .get_post(id.clone())
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("post {id} not found")))?;
  Ok(success(post))
}

/// `GET /posts/{id}/comments`
pub async fn comments<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Envelope<Vec<Comment>>>, ApiError>
where
  S: ForumStore,
{
  let comments = store.list_comments(id).await.map_err(ApiError::from_store)?;
  Ok(success(comments))
}

// ─── Comments ─────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /comment/create`.
#[derive(Debug, Deserialize)]
pub struct NewCommentBody {
  pub content:   String,
  pub author:    String,
  pub post_id:   String,
  /// Omitted or empty for a top-level comment.
  #[serde(default)]
  pub parent_id: Option<String>,
}

impl From<NewCommentBody> for NewComment {
  fn from(b: NewCommentBody) -> Self {
    NewComment {
      content:   b.content,
      author:    b.author,
      post_id:   b.post_id,
      parent_id: b.parent_id.filter(|p| !p.is_empty()),
    }
  }
}

/// `POST /comment/create`. Answers 201 with the generated comment id.
pub async fn create_comment<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<NewCommentBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ForumStore,
{
  let Json(body) = body?;
  let comment = store
    .create_comment(NewComment::from(body))
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, success(Created { id: comment.id })))
}

/// `GET /comments/{id}`
pub async fn get_comment<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Envelope<Comment>>, ApiError>
where
  S: ForumStore,
{
  let comment = store
    .get_comment(id.clone())
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("comment {id} not found")))?;
  Ok(success(comment))
}
