//! Handler for `POST /message/send`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use forum_core::{model::DirectMessage, store::ForumStore};
use serde::Deserialize;

use crate::{
  error::ApiError,
  response::{Envelope, success},
};

#[derive(Debug, Deserialize)]
pub struct SendBody {
  pub from:    String,
  pub to:      String,
  pub content: String,
}

/// `POST /message/send`. Body: `{"from":"bob","to":"alice","content":"hi"}`
pub async fn send<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<SendBody>, JsonRejection>,
) -> Result<Json<Envelope<&'static str>>, ApiError>
where
  S: ForumStore,
{
  let Json(body) = body?;
  store
    .send_direct_message(DirectMessage::new(body.from, body.to, body.content))
    .await
    .map_err(ApiError::from_store)?;
  Ok(success("DM sent successfully"))
}
