//! The request sum type consumed by the worker.
//!
//! Each variant carries its own typed responder, so the reply to a command can
//! only ever be the result type that command produces.

use forum_core::{
  Result,
  feed::UserFeed,
  model::{Comment, DirectMessage, NewComment, NewPost, Post, Subreddit, User},
  vote::{Vote, VoteDirection, VoteReceipt},
};
use tokio::sync::oneshot;
use tracing::warn;

use crate::state::EntityStore;

pub(crate) type Responder<T> = oneshot::Sender<Result<T>>;

#[derive(strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub(crate) enum Command {
  RegisterUser {
    username: String,
    reply:    Responder<User>,
  },
  GetUser {
    username: String,
    reply:    Responder<Option<User>>,
  },
  SendDirectMessage {
    message: DirectMessage,
    reply:   Responder<()>,
  },
  CreateSubreddit {
    name:        String,
    description: String,
    reply:       Responder<Subreddit>,
  },
  GetSubreddit {
    name:  String,
    reply: Responder<Option<Subreddit>>,
  },
  JoinSubreddit {
    username:  String,
    subreddit: String,
    reply:     Responder<()>,
  },
  LeaveSubreddit {
    username:  String,
    subreddit: String,
    reply:     Responder<()>,
  },
  CreatePost {
    input: NewPost,
    reply: Responder<Post>,
  },
  GetPost {
    id:    String,
    reply: Responder<Option<Post>>,
  },
  CreateComment {
    input: NewComment,
    reply: Responder<Comment>,
  },
  GetComment {
    id:    String,
    reply: Responder<Option<Comment>>,
  },
  ListComments {
    post_id: String,
    reply:   Responder<Vec<Comment>>,
  },
  Vote {
    vote:      Vote,
    direction: VoteDirection,
    reply:     Responder<VoteReceipt>,
  },
  UserFeed {
    username: String,
    reply:    Responder<UserFeed>,
  },
}

impl Command {
  /// Apply this command to `store` and send the outcome to its caller.
  pub(crate) fn apply(self, store: &mut EntityStore) {
    match self {
      Command::RegisterUser { username, reply } => {
        respond(reply, store.register_user(username));
      }
      Command::GetUser { username, reply } => {
        respond(reply, Ok(store.user(&username).cloned()));
      }
      Command::SendDirectMessage { message, reply } => {
        respond(reply, store.send_direct_message(message));
      }
      Command::CreateSubreddit { name, description, reply } => {
        respond(reply, store.create_subreddit(name, description));
      }
      Command::GetSubreddit { name, reply } => {
        respond(reply, Ok(store.subreddit(&name).cloned()));
      }
      Command::JoinSubreddit { username, subreddit, reply } => {
        respond(reply, store.join_subreddit(&username, &subreddit));
      }
      Command::LeaveSubreddit { username, subreddit, reply } => {
        respond(reply, store.leave_subreddit(&username, &subreddit));
      }
      Command::CreatePost { input, reply } => {
        respond(reply, store.create_post(input));
      }
      Command::GetPost { id, reply } => {
        respond(reply, Ok(store.post(&id).cloned()));
      }
      Command::CreateComment { input, reply } => {
        respond(reply, store.create_comment(input));
      }
      Command::GetComment { id, reply } => {
        respond(reply, Ok(store.comment(&id).cloned()));
      }
      Command::ListComments { post_id, reply } => {
        respond(reply, store.list_comments(&post_id));
      }
      Command::Vote { vote, direction, reply } => {
        respond(reply, store.vote(vote, direction));
      }
      Command::UserFeed { username, reply } => {
        respond(reply, Ok(store.user_feed(&username)));
      }
    }
  }
}

fn respond<T>(reply: Responder<T>, outcome: Result<T>) {
  // The effect has already been applied; only the notification is lost.
  if reply.send(outcome).is_err() {
    warn!("caller stopped waiting before the reply was ready");
  }
}
