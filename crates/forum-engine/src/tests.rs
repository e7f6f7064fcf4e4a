//! Integration tests for `EngineHandle` against a live worker.

use std::time::Duration;

use forum_core::{
  Error as DomainError,
  feed::{PostSummary, UserFeed},
  model::{DirectMessage, EntityKind, NewComment, NewPost},
  store::{ForumStore, StoreError},
  vote::{MediaType, Vote, VoteDirection},
};

use crate::{Engine, EngineConfig, EngineHandle, EntityStore, Error};

fn engine() -> EngineHandle { Engine::spawn(&EngineConfig::default()) }

/// Unwrap the domain error out of an engine error.
fn domain(err: Error) -> DomainError {
  err.domain().cloned().expect("expected a domain error")
}

async fn with_users(names: &[&str]) -> EngineHandle {
  let e = engine();
  for name in names {
    e.register_user(name.to_string()).await.unwrap();
  }
  e
}

// ─── Uniqueness ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn register_user_twice_fails_and_keeps_state() {
  let e = engine();

  let alice = e.register_user("alice".into()).await.unwrap();
  assert_eq!(alice.id, "alice");

  e.send_direct_message(DirectMessage::new("alice", "alice", "note to self"))
    .await
    .unwrap();

  let err = e.register_user("alice".into()).await.unwrap_err();
  assert_eq!(
    domain(err),
    DomainError::AlreadyExists { kind: EntityKind::User, id: "alice".into() }
  );

  // The original record, inbox included, is untouched.
  let alice = e.get_user("alice".into()).await.unwrap().unwrap();
  assert_eq!(alice.inbox, ["From: alice - note to self"]);
}

#[tokio::test]
async fn create_subreddit_twice_fails_and_keeps_description() {
  let e = engine();
  e.create_subreddit("golang".into(), "gophers".into()).await.unwrap();

  let err = e
    .create_subreddit("golang".into(), "impostors".into())
    .await
    .unwrap_err();
  assert_eq!(
    domain(err),
    DomainError::AlreadyExists {
      kind: EntityKind::Subreddit,
      id:   "golang".into(),
    }
  );

  let sub = e.get_subreddit("golang".into()).await.unwrap().unwrap();
  assert_eq!(sub.description, "gophers");
  assert!(sub.members.is_empty());
}

// ─── Membership ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn join_is_idempotent() {
  let e = with_users(&["alice"]).await;
  e.create_subreddit("rust".into(), String::new()).await.unwrap();

  e.join_subreddit("alice".into(), "rust".into()).await.unwrap();
  let once = e.get_subreddit("rust".into()).await.unwrap().unwrap();
  e.join_subreddit("alice".into(), "rust".into()).await.unwrap();
  let twice = e.get_subreddit("rust".into()).await.unwrap().unwrap();

  assert_eq!(once.members, twice.members);
  assert_eq!(twice.members.len(), 1);
}

#[tokio::test]
async fn join_checks_user_then_subreddit() {
  let e = with_users(&["alice"]).await;

  let err = e
    .join_subreddit("ghost".into(), "nowhere".into())
    .await
    .unwrap_err();
  assert_eq!(domain(err), DomainError::UserNotFound("ghost".into()));

  let err = e
    .join_subreddit("alice".into(), "nowhere".into())
    .await
    .unwrap_err();
  assert_eq!(domain(err), DomainError::SubredditNotFound("nowhere".into()));
}

#[tokio::test]
async fn leave_removes_membership_and_tolerates_non_members() {
  let e = with_users(&["alice"]).await;
  e.create_subreddit("rust".into(), String::new()).await.unwrap();
  e.join_subreddit("alice".into(), "rust".into()).await.unwrap();

  e.leave_subreddit("alice".into(), "rust".into()).await.unwrap();
  let sub = e.get_subreddit("rust".into()).await.unwrap().unwrap();
  assert!(!sub.is_member("alice"));

  // Leaving again, or as a user that never existed, is a no-op.
  e.leave_subreddit("alice".into(), "rust".into()).await.unwrap();
  e.leave_subreddit("ghost".into(), "rust".into()).await.unwrap();

  // Only the user is still there; leaving never deletes entities.
  assert!(e.get_user("alice".into()).await.unwrap().is_some());
  assert!(e.get_subreddit("rust".into()).await.unwrap().is_some());

  let err = e
    .leave_subreddit("alice".into(), "nowhere".into())
    .await
    .unwrap_err();
  assert_eq!(domain(err), DomainError::SubredditNotFound("nowhere".into()));
}

// ─── Referential integrity ───────────────────────────────────────────────────

#[tokio::test]
async fn create_post_requires_author_and_subreddit() {
  let e = with_users(&["alice"]).await;
  e.create_subreddit("rust".into(), String::new()).await.unwrap();

  let err = e
    .create_post(NewPost::new("t", "c", "ghost", "rust"))
    .await
    .unwrap_err();
  assert_eq!(domain(err), DomainError::UserNotFound("ghost".into()));

  let err = e
    .create_post(NewPost::new("t", "c", "alice", "nowhere"))
    .await
    .unwrap_err();
  assert_eq!(domain(err), DomainError::SubredditNotFound("nowhere".into()));

  // Nothing was created, and the failures did not burn an id.
  assert!(e.get_post("alice_post_1".into()).await.unwrap().is_none());
  let post = e
    .create_post(NewPost::new("t", "c", "alice", "rust"))
    .await
    .unwrap();
  assert_eq!(post.id, "alice_post_1");
  assert_eq!(post.author, "alice");
  assert_eq!(post.subreddit, "rust");
  assert_eq!((post.upvotes, post.downvotes), (0, 0));
}

#[tokio::test]
async fn create_comment_requires_author_and_post() {
  let e = with_users(&["alice", "bob"]).await;
  e.create_subreddit("rust".into(), String::new()).await.unwrap();
  let post = e
    .create_post(NewPost::new("t", "c", "alice", "rust"))
    .await
    .unwrap();

  let err = e
    .create_comment(NewComment::new("hi", "ghost", &post.id))
    .await
    .unwrap_err();
  assert_eq!(domain(err), DomainError::UserNotFound("ghost".into()));

  let err = e
    .create_comment(NewComment::new("hi", "bob", "bob_post_99"))
    .await
    .unwrap_err();
  assert_eq!(domain(err), DomainError::PostNotFound("bob_post_99".into()));

  assert!(e.list_comments(post.id.clone()).await.unwrap().is_empty());
}

#[tokio::test]
async fn comment_parent_is_copied_without_validation() {
  let e = with_users(&["alice", "bob"]).await;
  e.create_subreddit("rust".into(), String::new()).await.unwrap();
  let post = e
    .create_post(NewPost::new("t", "c", "alice", "rust"))
    .await
    .unwrap();

  let top = e
    .create_comment(NewComment::new("first", "bob", &post.id))
    .await
    .unwrap();
  assert_eq!(top.id, "bob_comment_1");
  assert_eq!(top.parent_id, None);

  let reply = e
    .create_comment(NewComment::new("reply", "alice", &post.id).reply_to(&top.id))
    .await
    .unwrap();
  assert_eq!(reply.id, "alice_comment_2");
  assert_eq!(reply.parent_id.as_deref(), Some("bob_comment_1"));

  let dangling = e
    .create_comment(NewComment::new("?", "alice", &post.id).reply_to("no_such_comment"))
    .await
    .unwrap();
  assert_eq!(dangling.parent_id.as_deref(), Some("no_such_comment"));

  let thread: Vec<_> = e
    .list_comments(post.id.clone())
    .await
    .unwrap()
    .into_iter()
    .map(|c| c.id)
    .collect();
  assert_eq!(thread, [top.id, reply.id, dangling.id]);
}

#[tokio::test]
async fn list_comments_on_missing_post_fails() {
  let e = engine();
  let err = e.list_comments("nope".into()).await.unwrap_err();
  assert_eq!(domain(err), DomainError::PostNotFound("nope".into()));
}

// ─── Votes ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn votes_increment_by_one_per_call() {
  let e = with_users(&["alice", "bob"]).await;
  e.create_subreddit("rust".into(), String::new()).await.unwrap();
  let post = e
    .create_post(NewPost::new("t", "c", "alice", "rust"))
    .await
    .unwrap();
  let comment = e
    .create_comment(NewComment::new("hi", "bob", &post.id))
    .await
    .unwrap();

  // Same voter every time: repeat votes are counted.
  for _ in 0..5 {
    e.upvote(Vote::new("bob", "Post", &post.id)).await.unwrap();
  }
  for _ in 0..3 {
    e.downvote(Vote::new("bob", "Post", &post.id)).await.unwrap();
  }
  for _ in 0..2 {
    e.upvote(Vote::new("alice", "Comment", &comment.id)).await.unwrap();
  }

  let post = e.get_post(post.id).await.unwrap().unwrap();
  assert_eq!((post.upvotes, post.downvotes), (5, 3));

  let comment = e.get_comment(comment.id).await.unwrap().unwrap();
  assert_eq!((comment.upvotes, comment.downvotes), (2, 0));
}

#[tokio::test]
async fn vote_receipt_distinguishes_post_and_comment() {
  let e = with_users(&["alice"]).await;
  e.create_subreddit("rust".into(), String::new()).await.unwrap();
  let post = e
    .create_post(NewPost::new("t", "c", "alice", "rust"))
    .await
    .unwrap();
  let comment = e
    .create_comment(NewComment::new("hi", "alice", &post.id))
    .await
    .unwrap();

  let receipt = e.upvote(Vote::new("alice", "Post", &post.id)).await.unwrap();
  assert_eq!(receipt.media_type, MediaType::Post);
  assert_eq!(receipt.direction, VoteDirection::Up);
  assert_eq!(receipt.upvotes, 1);

  let receipt = e
    .downvote(Vote::new("alice", "Comment", &comment.id))
    .await
    .unwrap();
  assert_eq!(receipt.media_type, MediaType::Comment);
  assert_eq!(receipt.direction, VoteDirection::Down);
  assert_eq!((receipt.upvotes, receipt.downvotes), (0, 1));
}

#[tokio::test]
async fn vote_on_missing_target_fails() {
  let e = engine();

  let err = e.upvote(Vote::new("bob", "Post", "nope")).await.unwrap_err();
  assert_eq!(
    domain(err),
    DomainError::TargetNotFound { media_type: MediaType::Post, id: "nope".into() }
  );

  let err = e
    .downvote(Vote::new("bob", "Comment", "nope"))
    .await
    .unwrap_err();
  assert_eq!(
    domain(err),
    DomainError::TargetNotFound {
      media_type: MediaType::Comment,
      id:         "nope".into(),
    }
  );
}

#[tokio::test]
async fn vote_with_unknown_media_type_is_rejected() {
  let e = with_users(&["alice"]).await;
  e.create_subreddit("rust".into(), String::new()).await.unwrap();
  let post = e
    .create_post(NewPost::new("t", "c", "alice", "rust"))
    .await
    .unwrap();

  for raw in ["post", "Poll", ""] {
    let err = e.upvote(Vote::new("alice", raw, &post.id)).await.unwrap_err();
    assert_eq!(domain(err), DomainError::InvalidMediaType(raw.into()));
  }

  let post = e.get_post(post.id).await.unwrap().unwrap();
  assert_eq!(post.upvotes, 0);
}

// ─── Direct messages ─────────────────────────────────────────────────────────

#[tokio::test]
async fn direct_message_appends_to_recipient_inbox() {
  let e = with_users(&["alice", "bob"]).await;

  e.send_direct_message(DirectMessage::new("bob", "alice", "hi"))
    .await
    .unwrap();
  e.send_direct_message(DirectMessage::new("bob", "alice", "again"))
    .await
    .unwrap();

  let alice = e.get_user("alice".into()).await.unwrap().unwrap();
  assert_eq!(alice.inbox, ["From: bob - hi", "From: bob - again"]);

  let bob = e.get_user("bob".into()).await.unwrap().unwrap();
  assert!(bob.inbox.is_empty());
}

#[tokio::test]
async fn direct_message_checks_recipient_then_sender() {
  let e = with_users(&["alice"]).await;

  // alice sends to nobody: fails, and her own inbox is unchanged.
  let err = e
    .send_direct_message(DirectMessage::new("alice", "ghost", "hello?"))
    .await
    .unwrap_err();
  assert_eq!(domain(err), DomainError::RecipientNotFound("ghost".into()));

  // Both missing: the recipient is reported.
  let err = e
    .send_direct_message(DirectMessage::new("phantom", "ghost", "boo"))
    .await
    .unwrap_err();
  assert_eq!(domain(err), DomainError::RecipientNotFound("ghost".into()));

  let err = e
    .send_direct_message(DirectMessage::new("ghost", "alice", "boo"))
    .await
    .unwrap_err();
  assert_eq!(domain(err), DomainError::SenderNotFound("ghost".into()));

  let alice = e.get_user("alice".into()).await.unwrap().unwrap();
  assert!(alice.inbox.is_empty());
}

// ─── Feed ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn feed_contains_exactly_joined_subreddits() {
  let e = with_users(&["u", "writer"]).await;
  for name in ["A", "B", "C"] {
    e.create_subreddit(name.into(), String::new()).await.unwrap();
  }
  e.join_subreddit("u".into(), "A".into()).await.unwrap();
  e.join_subreddit("u".into(), "B".into()).await.unwrap();

  for sub in ["A", "B", "C"] {
    e.create_post(NewPost::new(format!("in {sub}"), "", "writer", sub))
      .await
      .unwrap();
  }

  let feed = e.user_feed("u".into()).await.unwrap();
  assert_eq!(
    feed.posts(),
    [
      PostSummary {
        subreddit: "A".into(),
        title:     "in A".into(),
        author:    "writer".into(),
      },
      PostSummary {
        subreddit: "B".into(),
        title:     "in B".into(),
        author:    "writer".into(),
      },
    ]
  );
}

#[tokio::test]
async fn feed_reflects_leaving() {
  let e = with_users(&["alice"]).await;
  e.create_subreddit("rust".into(), String::new()).await.unwrap();
  e.join_subreddit("alice".into(), "rust".into()).await.unwrap();
  e.create_post(NewPost::new("t", "", "alice", "rust"))
    .await
    .unwrap();
  assert_eq!(e.user_feed("alice".into()).await.unwrap().posts().len(), 1);

  e.leave_subreddit("alice".into(), "rust".into()).await.unwrap();
  assert_eq!(
    e.user_feed("alice".into()).await.unwrap(),
    UserFeed::Posts(vec![])
  );
}

#[tokio::test]
async fn feed_for_unknown_user_is_not_an_error() {
  let e = engine();
  let feed = e.user_feed("nobody".into()).await.unwrap();
  assert_eq!(feed, UserFeed::UnknownUser);
  assert!(feed.posts().is_empty());
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn golang_scenario() {
  let e = with_users(&["alice", "bob"]).await;
  e.create_subreddit("golang".into(), "gophers".into()).await.unwrap();
  e.join_subreddit("alice".into(), "golang".into()).await.unwrap();

  let post = e
    .create_post(NewPost::new("Hello", "first!", "alice", "golang"))
    .await
    .unwrap();
  e.upvote(Vote::new("bob", "Post", &post.id)).await.unwrap();

  let post = e.get_post(post.id).await.unwrap().unwrap();
  assert_eq!(post.upvotes, 1);

  let alice_feed = e.user_feed("alice".into()).await.unwrap();
  assert_eq!(
    alice_feed.posts(),
    [PostSummary {
      subreddit: "golang".into(),
      title:     "Hello".into(),
      author:    "alice".into(),
    }]
  );

  let bob_feed = e.user_feed("bob".into()).await.unwrap();
  assert_eq!(bob_feed, UserFeed::Posts(vec![]));
}

// ─── Serialization ───────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_submissions_get_distinct_ids() {
  let e = with_users(&["alice", "bob"]).await;
  e.create_subreddit("rust".into(), String::new()).await.unwrap();

  let mut tasks = Vec::new();
  for i in 0..64 {
    let e = e.clone();
    let author = if i % 2 == 0 { "alice" } else { "bob" };
    tasks.push(tokio::spawn(async move {
      e.create_post(NewPost::new(format!("post {i}"), "", author, "rust"))
        .await
        .unwrap()
        .id
    }));
  }

  let mut ids = Vec::new();
  for task in tasks {
    ids.push(task.await.unwrap());
  }
  ids.sort();
  ids.dedup();
  assert_eq!(ids.len(), 64);

  e.join_subreddit("alice".into(), "rust".into()).await.unwrap();
  assert_eq!(e.user_feed("alice".into()).await.unwrap().posts().len(), 64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_votes_are_all_counted() {
  let e = with_users(&["alice"]).await;
  e.create_subreddit("rust".into(), String::new()).await.unwrap();
  let post = e
    .create_post(NewPost::new("t", "", "alice", "rust"))
    .await
    .unwrap();

  let mut tasks = Vec::new();
  for _ in 0..100 {
    let e = e.clone();
    let id = post.id.clone();
    tasks.push(tokio::spawn(async move {
      e.upvote(Vote::new("alice", "Post", id)).await.unwrap();
    }));
  }
  for task in tasks {
    task.await.unwrap();
  }

  let post = e.get_post(post.id).await.unwrap().unwrap();
  assert_eq!(post.upvotes, 100);
}

// ─── Worker lifecycle ────────────────────────────────────────────────────────

#[tokio::test]
async fn worker_returns_store_when_handles_drop() {
  let (worker, handle) = Engine::new(EntityStore::new(), &EngineConfig::default());
  let worker = tokio::spawn(worker.run());

  handle.register_user("alice".into()).await.unwrap();
  handle
    .create_subreddit("rust".into(), String::new())
    .await
    .unwrap();
  let clone = handle.clone();
  drop(handle);
  clone
    .create_post(NewPost::new("t", "", "alice", "rust"))
    .await
    .unwrap();
  drop(clone);

  let store = worker.await.unwrap();
  assert_eq!(store.user_count(), 1);
  assert_eq!(store.subreddit_count(), 1);
  assert_eq!(store.post_count(), 1);
  assert!(store.post("alice_post_1").is_some());
}

#[tokio::test]
async fn stopped_worker_reports_closed() {
  let (worker, handle) = Engine::new(EntityStore::new(), &EngineConfig::default());
  drop(worker);

  let err = handle.register_user("alice".into()).await.unwrap_err();
  assert!(matches!(err, Error::Closed), "unexpected error: {err:?}");
  assert!(err.domain().is_none());
}

#[tokio::test]
async fn idle_worker_times_out_the_caller() {
  let config = EngineConfig {
    queue_capacity:  4,
    request_timeout: Duration::from_millis(20),
  };
  // The worker is never run, so the command sits in the queue.
  let (_worker, handle) = Engine::new(EntityStore::new(), &config);

  let err = handle.register_user("alice".into()).await.unwrap_err();
  assert!(
    matches!(err, Error::Timeout(t) if t == Duration::from_millis(20)),
    "unexpected error: {err:?}"
  );
}
