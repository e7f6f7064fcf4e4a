//! Handler for `GET /feed/{username}`.
//!
//! An unknown username still gets a `success` envelope; its data carries an
//! `error` field instead of `posts`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use forum_core::{
  feed::{PostSummary, UserFeed},
  store::ForumStore,
};
use serde::Serialize;

use crate::{
  error::ApiError,
  response::{Envelope, success},
};

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum FeedData {
  Posts { posts: Vec<PostSummary> },
  UnknownUser { error: &'static str },
}

impl From<UserFeed> for FeedData {
  fn from(feed: UserFeed) -> Self {
    match feed {
      UserFeed::Posts(posts) => FeedData::Posts { posts },
      UserFeed::UnknownUser => FeedData::UnknownUser { error: "User doesn't exist" },
    }
  }
}

/// `GET /feed/{username}`
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  Path(username): Path<String>,
) -> Result<Json<Envelope<FeedData>>, ApiError>
where
  S: ForumStore,
{
  let feed = store.user_feed(username).await.map_err(ApiError::from_store)?;
  Ok(success(FeedData::from(feed)))
}
