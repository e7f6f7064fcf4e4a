//! Votes on posts and comments.
//!
//! Upvote and downvote counters are independent and only ever grow. There is
//! no per-user bookkeeping: voting twice counts twice.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The kind of entity a vote targets.
///
/// Parsing is exact and case-sensitive: only `"Post"` and `"Comment"` are
/// accepted.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::EnumString,
  strum::IntoStaticStr,
)]
pub enum MediaType {
  Post,
  Comment,
}

impl MediaType {
  /// Parse a caller-supplied media type, rejecting anything but the two
  /// literal names.
  pub fn parse(raw: &str) -> Result<Self> {
    raw
      .parse()
      .map_err(|_| Error::InvalidMediaType(raw.to_owned()))
  }

  /// The wire name, `"Post"` or `"Comment"`.
  pub fn as_str(self) -> &'static str { self.into() }
}

impl fmt::Display for MediaType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Post => f.write_str("post"),
      Self::Comment => f.write_str("comment"),
    }
  }
}

/// Which counter a vote increments.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
  #[strum(serialize = "upvote")]
  Up,
  #[strum(serialize = "downvote")]
  Down,
}

/// A vote request as received from a caller.
///
/// `media_type` is kept raw so that an unknown value surfaces as
/// [`Error::InvalidMediaType`] from the engine rather than being dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
  /// The voting user. Not validated; recorded in logs only.
  pub voter:      String,
  pub media_type: String,
  pub target_id:  String,
}

impl Vote {
  pub fn new(
    voter: impl Into<String>,
    media_type: impl Into<String>,
    target_id: impl Into<String>,
  ) -> Self {
    Self {
      voter:      voter.into(),
      media_type: media_type.into(),
      target_id:  target_id.into(),
    }
  }
}

/// The outcome of an accepted vote: which entity was hit and its counters
/// after the increment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceipt {
  pub media_type: MediaType,
  pub target_id:  String,
  pub direction:  VoteDirection,
  pub upvotes:    u64,
  pub downvotes:  u64,
}
