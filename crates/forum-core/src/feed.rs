//! Personalised feed read model.

use serde::{Deserialize, Serialize};

use crate::model::Post;

/// One feed entry: where a post lives, what it is called, and who wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
  pub subreddit: String,
  pub title:     String,
  pub author:    String,
}

impl From<&Post> for PostSummary {
  fn from(post: &Post) -> Self {
    Self {
      subreddit: post.subreddit.clone(),
      title:     post.title.clone(),
      author:    post.author.clone(),
    }
  }
}

/// The result of a feed query.
///
/// An unknown username is not an error: it yields [`UserFeed::UnknownUser`],
/// which the transport still reports as a successful response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFeed {
  /// Posts from every subreddit the user belongs to, in creation order.
  Posts(Vec<PostSummary>),
  UnknownUser,
}

impl UserFeed {
  /// The feed entries; empty for an unknown user.
  pub fn posts(&self) -> &[PostSummary] {
    match self {
      Self::Posts(posts) => posts,
      Self::UnknownUser => &[],
    }
  }
}
