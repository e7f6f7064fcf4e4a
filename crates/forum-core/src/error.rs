//! Error types for `forum-core`.
//!
//! Every variant is a routine, request-level outcome: a referenced entity is
//! missing, an identifier is taken, or a vote names an unknown media type.

use thiserror::Error;

use crate::{model::EntityKind, vote::MediaType};

#[derive(Debug, Clone, PartialEq, Eq, Error, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Error {
  #[error("{kind} {id:?} already exists")]
  AlreadyExists { kind: EntityKind, id: String },

  #[error("no such user: {0}")]
  UserNotFound(String),

  #[error("no such subreddit: {0}")]
  SubredditNotFound(String),

  #[error("no such post: {0}")]
  PostNotFound(String),

  /// The target of a vote does not exist under the stated media type.
  #[error("no such {media_type} to vote on: {id}")]
  TargetNotFound { media_type: MediaType, id: String },

  #[error("recipient doesn't exist: {0}")]
  RecipientNotFound(String),

  #[error("sender doesn't exist: {0}")]
  SenderNotFound(String),

  #[error("invalid media type {0:?}, expected \"Post\" or \"Comment\"")]
  InvalidMediaType(String),
}

impl Error {
  /// Stable snake_case code for this error, e.g. `"user_not_found"`.
  pub fn code(&self) -> &'static str { self.into() }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
