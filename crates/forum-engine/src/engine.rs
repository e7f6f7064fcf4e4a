//! [`Engine`], the single worker that owns the [`EntityStore`], and
//! [`EngineHandle`], the cloneable submission side implementing
//! [`ForumStore`].
//!
//! Commands travel over one bounded mpsc channel and are applied strictly in
//! the order they were accepted. Each command carries a oneshot responder;
//! the handle waits for it with a timeout.

use std::time::Duration;

use forum_core::{
  feed::UserFeed,
  model::{Comment, DirectMessage, NewComment, NewPost, Post, Subreddit, User},
  store::ForumStore,
  vote::{Vote, VoteDirection, VoteReceipt},
};
use tokio::sync::{mpsc, oneshot};
use tracing::{info, trace};

use crate::{Error, Result, command::Command, state::EntityStore};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Tuning for the worker queue and caller-side waiting.
#[derive(Debug, Clone)]
pub struct EngineConfig {
  /// Commands that may be queued before submitters start waiting for room.
  pub queue_capacity:  usize,
  /// How long a caller waits for its reply, queueing included.
  pub request_timeout: Duration,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      queue_capacity:  1024,
      request_timeout: Duration::from_secs(1),
    }
  }
}

// ─── Worker ──────────────────────────────────────────────────────────────────

/// The serialized worker. Nothing else ever touches its store.
pub struct Engine {
  store:    EntityStore,
  commands: mpsc::Receiver<Command>,
}

impl Engine {
  /// Build a worker around `store` and the handle that feeds it. The worker
  /// does nothing until [`Engine::run`] is polled.
  pub fn new(store: EntityStore, config: &EngineConfig) -> (Self, EngineHandle) {
    let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
    let engine = Self { store, commands: rx };
    let handle = EngineHandle {
      commands:        tx,
      request_timeout: config.request_timeout,
    };
    (engine, handle)
  }

  /// Start a worker over an empty store on the current tokio runtime.
  pub fn spawn(config: &EngineConfig) -> EngineHandle {
    let (engine, handle) = Self::new(EntityStore::new(), config);
    tokio::spawn(engine.run());
    handle
  }

  /// Apply commands one at a time until every handle has been dropped, then
  /// return the final store.
  pub async fn run(mut self) -> EntityStore {
    info!("forum engine started");
    while let Some(command) = self.commands.recv().await {
      let name: &'static str = (&command).into();
      trace!(command = name, "applying command");
      command.apply(&mut self.store);
    }
    info!(
      users = self.store.user_count(),
      subreddits = self.store.subreddit_count(),
      posts = self.store.post_count(),
      comments = self.store.comment_count(),
      "forum engine stopped"
    );
    self.store
  }
}

// ─── Handle ──────────────────────────────────────────────────────────────────

/// Submission side of an [`Engine`].
///
/// Clones share the same queue.
#[derive(Clone)]
pub struct EngineHandle {
  commands:        mpsc::Sender<Command>,
  request_timeout: Duration,
}

impl EngineHandle {
  /// Enqueue `command` and wait for the reply on `response`.
  async fn submit<T>(
    &self,
    command: Command,
    response: oneshot::Receiver<forum_core::Result<T>>,
  ) -> Result<T> {
    let exchange = async {
      self
        .commands
        .send(command)
        .await
        .map_err(|_| Error::Closed)?;
      response.await.map_err(|_| Error::Closed)
    };

    let outcome = tokio::time::timeout(self.request_timeout, exchange)
      .await
      .map_err(|_| Error::Timeout(self.request_timeout))??;
    Ok(outcome?)
  }

  async fn vote(&self, vote: Vote, direction: VoteDirection) -> Result<VoteReceipt> {
    let (reply, response) = oneshot::channel();
    self
      .submit(Command::Vote { vote, direction, reply }, response)
      .await
  }
}

// ─── ForumStore impl ─────────────────────────────────────────────────────────

impl ForumStore for EngineHandle {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn register_user(&self, username: String) -> Result<User> {
    let (reply, response) = oneshot::channel();
    self
      .submit(Command::RegisterUser { username, reply }, response)
      .await
  }

  async fn get_user(&self, username: String) -> Result<Option<User>> {
    let (reply, response) = oneshot::channel();
    self.submit(Command::GetUser { username, reply }, response).await
  }

  async fn send_direct_message(&self, message: DirectMessage) -> Result<()> {
    let (reply, response) = oneshot::channel();
    self
      .submit(Command::SendDirectMessage { message, reply }, response)
      .await
  }

  // ── Subreddits ────────────────────────────────────────────────────────────

  async fn create_subreddit(
    &self,
    name: String,
    description: String,
  ) -> Result<Subreddit> {
    let (reply, response) = oneshot::channel();
    self
      .submit(Command::CreateSubreddit { name, description, reply }, response)
      .await
  }

  async fn get_subreddit(&self, name: String) -> Result<Option<Subreddit>> {
    let (reply, response) = oneshot::channel();
    self.submit(Command::GetSubreddit { name, reply }, response).await
  }

  async fn join_subreddit(&self, username: String, subreddit: String) -> Result<()> {
    let (reply, response) = oneshot::channel();
    self
      .submit(Command::JoinSubreddit { username, subreddit, reply }, response)
      .await
  }

  async fn leave_subreddit(&self, username: String, subreddit: String) -> Result<()> {
    let (reply, response) = oneshot::channel();
    self
      .submit(Command::LeaveSubreddit { username, subreddit, reply }, response)
      .await
  }

  // ── Posts and comments ────────────────────────────────────────────────────

  async fn create_post(&self, input: NewPost) -> Result<Post> {
    let (reply, response) = oneshot::channel();
    self.submit(Command::CreatePost { input, reply }, response).await
  }

  async fn get_post(&self, id: String) -> Result<Option<Post>> {
    let (reply, response) = oneshot::channel();
    self.submit(Command::GetPost { id, reply }, response).await
  }

  async fn create_comment(&self, input: NewComment) -> Result<Comment> {
    let (reply, response) = oneshot::channel();
    self.submit(Command::CreateComment { input, reply }, response).await
  }

  async fn get_comment(&self, id: String) -> Result<Option<Comment>> {
    let (reply, response) = oneshot::channel();
    self.submit(Command::GetComment { id, reply }, response).await
  }

  async fn list_comments(&self, post_id: String) -> Result<Vec<Comment>> {
    let (reply, response) = oneshot::channel();
    self.submit(Command::ListComments { post_id, reply }, response).await
  }

  // ── Votes ─────────────────────────────────────────────────────────────────

  async fn upvote(&self, vote: Vote) -> Result<VoteReceipt> {
    self.vote(vote, VoteDirection::Up).await
  }

  async fn downvote(&self, vote: Vote) -> Result<VoteReceipt> {
    self.vote(vote, VoteDirection::Down).await
  }

  // ── Feed ──────────────────────────────────────────────────────────────────

  async fn user_feed(&self, username: String) -> Result<UserFeed> {
    let (reply, response) = oneshot::channel();
    self.submit(Command::UserFeed { username, reply }, response).await
  }
}
