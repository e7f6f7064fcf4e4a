//! JSON REST API for the forum engine.
//!
//! Exposes an axum [`Router`] backed by any [`forum_core::store::ForumStore`].
//! Every response uses the [`response::Envelope`] shape. Transport concerns
//! (TLS, tracing layers, binding) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = forum_api::api_router(Arc::new(handle));
//! axum::serve(listener, app).await?;
//! ```

pub mod error;
pub mod feed;
pub mod messages;
pub mod posts;
pub mod response;
pub mod subreddits;
pub mod users;
pub mod votes;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use forum_core::store::ForumStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ForumStore + 'static,
{
  Router::new()
    // Users
    .route("/register", post(users::register::<S>))
    .route("/users/{username}", get(users::get_one::<S>))
    .route("/message/send", post(messages::send::<S>))
    // Subreddits
    .route("/subreddit/create", post(subreddits::create::<S>))
    .route("/subreddit/join", post(subreddits::join::<S>))
    .route("/subreddit/leave", post(subreddits::leave::<S>))
    .route("/subreddits/{name}", get(subreddits::get_one::<S>))
    // Posts and comments
    .route("/post/create", post(posts::create::<S>))
    .route("/posts/{id}", get(posts::get_one::<S>))
    .route("/posts/{id}/comments", get(posts::comments::<S>))
    .route("/comment/create", post(posts::create_comment::<S>))
    .route("/comments/{id}", get(posts::get_comment::<S>))
    // Votes
    .route("/post/upvote", post(votes::upvote::<S>))
    .route("/post/downvote", post(votes::downvote::<S>))
    // Feed
    .route("/feed/{username}", get(feed::handler::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────
