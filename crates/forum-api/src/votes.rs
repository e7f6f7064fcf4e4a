//! Handlers for `POST /post/upvote` and `POST /post/downvote`.
//!
//! Both accept `{"user_id":"...","media_type":"Post"|"Comment","target_id":"..."}`.
//! Any other `media_type` is answered with 400 `invalid_media_type`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use forum_core::{
  store::ForumStore,
  vote::{MediaType, Vote, VoteDirection, VoteReceipt},
};
use serde::Deserialize;

use crate::{
  error::ApiError,
  response::{Envelope, success},
};

#[derive(Debug, Deserialize)]
pub struct VoteBody {
  pub user_id:    String,
  pub media_type: String,
  pub target_id:  String,
}

impl From<VoteBody> for Vote {
  fn from(b: VoteBody) -> Self {
    Vote {
      voter:      b.user_id,
      media_type: b.media_type,
      target_id:  b.target_id,
    }
  }
}

fn confirmation(receipt: &VoteReceipt) -> &'static str {
  match (receipt.media_type, receipt.direction) {
    (MediaType::Post, VoteDirection::Up) => "Post upvoted successfully",
    (MediaType::Post, VoteDirection::Down) => "Post downvoted successfully",
    (MediaType::Comment, VoteDirection::Up) => "Comment upvoted successfully",
    (MediaType::Comment, VoteDirection::Down) => "Comment downvoted successfully",
  }
}

/// `POST /post/upvote`
pub async fn upvote<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<VoteBody>, JsonRejection>,
) -> Result<Json<Envelope<&'static str>>, ApiError>
where
  S: ForumStore,
{
  let Json(body) = body?;
  let receipt = store
    .upvote(Vote::from(body))
    .await
    .map_err(ApiError::from_store)?;
  Ok(success(confirmation(&receipt)))
}

/// `POST /post/downvote`
pub async fn downvote<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<VoteBody>, JsonRejection>,
) -> Result<Json<Envelope<&'static str>>, ApiError>
where
  S: ForumStore,
{
  let Json(body) = body?;
  let receipt = store
    .downvote(Vote::from(body))
    .await
    .map_err(ApiError::from_store)?;
  Ok(success(confirmation(&receipt)))
}
