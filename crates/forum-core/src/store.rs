//! The `ForumStore` trait.
//!
//! The trait is implemented by engine backends (e.g. `forum-engine`). Higher
//! layers (`forum-api`) depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::{
  Error,
  feed::UserFeed,
  model::{Comment, DirectMessage, NewComment, NewPost, Post, Subreddit, User},
  vote::{Vote, VoteReceipt},
};

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Error type of a [`ForumStore`] backend.
///
/// A backend may fail for its own reasons (the worker is gone, the reply took
/// too long); the domain outcomes are reachable through [`StoreError::domain`]
/// so callers can react to them without knowing the backend.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// The domain error behind this failure, if there is one.
  fn domain(&self) -> Option<&Error>;
}

impl StoreError for Error {
  fn domain(&self) -> Option<&Error> { Some(self) }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a forum engine backend.
///
/// Implementations must apply operations one at a time, in the order they are
/// accepted, so each call observes the effects of every call accepted before
/// it. Entities are never deleted; every value returned is an owned snapshot.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ForumStore: Send + Sync {
  type Error: StoreError;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Register `username`. Fails with [`Error::AlreadyExists`] if taken.
  fn register_user(
    &self,
    username: String,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Snapshot of a user, including their inbox. `None` if unknown.
  fn get_user(
    &self,
    username: String,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Append a rendered message to the recipient's inbox.
  ///
  /// The recipient is checked before the sender:
  /// [`Error::RecipientNotFound`] wins over [`Error::SenderNotFound`].
  fn send_direct_message(
    &self,
    message: DirectMessage,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Subreddits ────────────────────────────────────────────────────────

  /// Create a subreddit with no members. Fails with
  /// [`Error::AlreadyExists`] if the name is taken.
  fn create_subreddit(
    &self,
    name: String,
    description: String,
  ) -> impl Future<Output = Result<Subreddit, Self::Error>> + Send + '_;

  /// Snapshot of a subreddit and its members. `None` if unknown.
  fn get_subreddit(
    &self,
    name: String,
  ) -> impl Future<Output = Result<Option<Subreddit>, Self::Error>> + Send + '_;

  /// Add `username` to the subreddit's members. Joining twice is a no-op.
  fn join_subreddit(
    &self,
    username: String,
    subreddit: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Remove `username` from the subreddit's members if present. The user
  /// need not exist.
  fn leave_subreddit(
    &self,
    username: String,
    subreddit: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Posts and comments ────────────────────────────────────────────────

  /// Create a post and return it with its generated id.
  fn create_post(
    &self,
    input: NewPost,
  ) -> impl Future<Output = Result<Post, Self::Error>> + Send + '_;

  /// Snapshot of a post. `None` if unknown.
  fn get_post(
    &self,
    id: String,
  ) -> impl Future<Output = Result<Option<Post>, Self::Error>> + Send + '_;

  /// Create a comment and return it with its generated id.
  fn create_comment(
    &self,
    input: NewComment,
  ) -> impl Future<Output = Result<Comment, Self::Error>> + Send + '_;

  /// Snapshot of a comment. `None` if unknown.
  fn get_comment(
    &self,
    id: String,
  ) -> impl Future<Output = Result<Option<Comment>, Self::Error>> + Send + '_;

  /// All comments on a post, in creation order. Fails with
  /// [`Error::PostNotFound`] if the post does not exist.
  fn list_comments(
    &self,
    post_id: String,
  ) -> impl Future<Output = Result<Vec<Comment>, Self::Error>> + Send + '_;

  // ── Votes ─────────────────────────────────────────────────────────────

  /// Increment the upvote counter of the targeted post or comment.
  fn upvote(
    &self,
    vote: Vote,
  ) -> impl Future<Output = Result<VoteReceipt, Self::Error>> + Send + '_;

  /// Increment the downvote counter of the targeted post or comment.
  fn downvote(
    &self,
    vote: Vote,
  ) -> impl Future<Output = Result<VoteReceipt, Self::Error>> + Send + '_;

  // ── Feed ──────────────────────────────────────────────────────────────

  /// Posts from every subreddit `username` belongs to, in creation order.
  fn user_feed(
    &self,
    username: String,
  ) -> impl Future<Output = Result<UserFeed, Self::Error>> + Send + '_;
}
