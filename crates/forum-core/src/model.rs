//! Entity types: users, subreddits, posts, comments and direct messages.
//!
//! Entities reference each other by identifier only. Ownership of the graph
//! belongs to the engine; everything handed out of it is an owned snapshot.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Kinds ───────────────────────────────────────────────────────────────────

/// The entity collections held by the store.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EntityKind {
  User,
  Subreddit,
  Post,
  Comment,
}

// ─── User ────────────────────────────────────────────────────────────────────

/// A registered user. The username is the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id:    String,
  /// Reserved; no operation changes it yet.
  pub karma: i64,
  /// Delivered direct messages, oldest first. Append-only.
  pub inbox: Vec<String>,
}

impl User {
  pub fn new(id: impl Into<String>) -> Self {
    Self { id: id.into(), karma: 0, inbox: Vec::new() }
  }
}

// ─── Subreddit ───────────────────────────────────────────────────────────────

/// A named community and its membership set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subreddit {
  pub name:        String,
  pub description: String,
  /// Usernames of current members.
  pub members:     BTreeSet<String>,
}

impl Subreddit {
  pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
    Self {
      name:        name.into(),
      description: description.into(),
      members:     BTreeSet::new(),
    }
  }

  pub fn is_member(&self, username: &str) -> bool {
    self.members.contains(username)
  }
}

// ─── Post ────────────────────────────────────────────────────────────────────

/// A post in a subreddit. `author` and `subreddit` are fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
  /// Generated as `<author>_post_<n>`.
  pub id:         String,
  pub title:      String,
  pub content:    String,
  pub author:     String,
  pub subreddit:  String,
  pub upvotes:    u64,
  pub downvotes:  u64,
  pub created_at: DateTime<Utc>,
}

/// Input to [`crate::store::ForumStore::create_post`]. The id, counters and
/// timestamp are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
  pub title:     String,
  pub content:   String,
  pub author:    String,
  pub subreddit: String,
}

impl NewPost {
  pub fn new(
    title: impl Into<String>,
    content: impl Into<String>,
    author: impl Into<String>,
    subreddit: impl Into<String>,
  ) -> Self {
    Self {
      title:     title.into(),
      content:   content.into(),
      author:    author.into(),
      subreddit: subreddit.into(),
    }
  }
}

// ─── Comment ─────────────────────────────────────────────────────────────────

/// A comment on a post, optionally replying to another comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
  /// Generated as `<author>_comment_<n>`.
  pub id:         String,
  pub content:    String,
  pub author:     String,
  pub post_id:    String,
  /// Copied verbatim from the request; never checked against existing
  /// comments.
  pub parent_id:  Option<String>,
  pub upvotes:    u64,
  pub downvotes:  u64,
  pub created_at: DateTime<Utc>,
}

/// Input to [`crate::store::ForumStore::create_comment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
  pub content:   String,
  pub author:    String,
  pub post_id:   String,
  pub parent_id: Option<String>,
}

impl NewComment {
  /// A top-level comment on `post_id`.
  pub fn new(
    content: impl Into<String>,
    author: impl Into<String>,
    post_id: impl Into<String>,
  ) -> Self {
    Self {
      content:   content.into(),
      author:    author.into(),
      post_id:   post_id.into(),
      parent_id: None,
    }
  }

  pub fn reply_to(mut self, parent_id: impl Into<String>) -> Self {
    self.parent_id = Some(parent_id.into());
    self
  }
}

// ─── Direct messages ─────────────────────────────────────────────────────────

/// A direct message between two users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectMessage {
  pub from:    String,
  pub to:      String,
  pub content: String,
}

impl DirectMessage {
  pub fn new(
    from: impl Into<String>,
    to: impl Into<String>,
    content: impl Into<String>,
  ) -> Self {
    Self { from: from.into(), to: to.into(), content: content.into() }
  }

  /// The line appended to the recipient's inbox.
  pub fn render(&self) -> String {
    format!("From: {} - {}", self.from, self.content)
  }
}
