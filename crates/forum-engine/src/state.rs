//! [`EntityStore`]: the in-memory entity graph.
//!
//! A passive holder: it knows how to look things up, and the operations in
//! `processor` and `feed` are the only code that mutates or scans it. It is
//! owned by exactly one [`crate::Engine`] worker.

use std::collections::HashMap;

use forum_core::model::{Comment, Post, Subreddit, User};
use indexmap::IndexMap;

/// The four entity collections plus the id counters.
///
/// Posts and comments keep insertion order so scans are deterministic.
#[derive(Debug, Default)]
pub struct EntityStore {
  pub(crate) users:            HashMap<String, User>,
  pub(crate) subreddits:       HashMap<String, Subreddit>,
  pub(crate) posts:            IndexMap<String, Post>,
  pub(crate) comments:         IndexMap<String, Comment>,
  /// Number of posts ever created; the next post takes `posts_created + 1`.
  pub(crate) posts_created:    u64,
  pub(crate) comments_created: u64,
}

impl EntityStore {
  pub fn new() -> Self { Self::default() }

  pub fn user(&self, username: &str) -> Option<&User> {
    self.users.get(username)
  }

  pub fn subreddit(&self, name: &str) -> Option<&Subreddit> {
    self.subreddits.get(name)
  }

  pub fn post(&self, id: &str) -> Option<&Post> { self.posts.get(id) }

  pub fn comment(&self, id: &str) -> Option<&Comment> {
    self.comments.get(id)
  }

  pub fn user_count(&self) -> usize { self.users.len() }

  pub fn subreddit_count(&self) -> usize { self.subreddits.len() }

  pub fn post_count(&self) -> usize { self.posts.len() }

  pub fn comment_count(&self) -> usize { self.comments.len() }

  pub(crate) fn next_post_id(&mut self, author: &str) -> String {
    self.posts_created += 1;
    format!("{author}_post_{}", self.posts_created)
  }

  pub(crate) fn next_comment_id(&mut self, author: &str) -> String {
    self.comments_created += 1;
    format!("{author}_comment_{}", self.comments_created)
  }
}
