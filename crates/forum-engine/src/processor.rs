//! Command processing: precondition checks and mutations on [`EntityStore`].
//!
//! Each operation either fully applies or leaves the store untouched. All
//! referential checks happen before the first write, and id counters are only
//! advanced once every check has passed.

use std::collections::hash_map::Entry;

use chrono::Utc;
use forum_core::{
  Error, Result,
  model::{
    Comment, DirectMessage, EntityKind, NewComment, NewPost, Post, Subreddit,
    User,
  },
  vote::{MediaType, Vote, VoteDirection, VoteReceipt},
};
use tracing::{debug, info};

use crate::state::EntityStore;

impl EntityStore {
  // ── Users ─────────────────────────────────────────────────────────────────

  pub fn register_user(&mut self, username: String) -> Result<User> {
    match self.users.entry(username) {
      Entry::Occupied(entry) => {
        debug!(username = %entry.key(), "username already taken");
        Err(Error::AlreadyExists {
          kind: EntityKind::User,
          id:   entry.key().clone(),
        })
      }
      Entry::Vacant(entry) => {
        let user = User::new(entry.key().clone());
        info!(username = %user.id, "registered new user");
        Ok(entry.insert(user).clone())
      }
    }
  }

  pub fn send_direct_message(&mut self, message: DirectMessage) -> Result<()> {
    if !self.users.contains_key(&message.to) {
      debug!(to = %message.to, "no such recipient");
      return Err(Error::RecipientNotFound(message.to));
    }
    if !self.users.contains_key(&message.from) {
      debug!(from = %message.from, "no such sender");
      return Err(Error::SenderNotFound(message.from));
    }

    let line = message.render();
    let recipient = self
      .users
      .get_mut(&message.to)
      .ok_or_else(|| Error::RecipientNotFound(message.to.clone()))?;
    recipient.inbox.push(line);

    info!(from = %message.from, to = %message.to, "direct message delivered");
    Ok(())
  }

  // ── Subreddits ────────────────────────────────────────────────────────────

  pub fn create_subreddit(
    &mut self,
    name: String,
    description: String,
  ) -> Result<Subreddit> {
    match self.subreddits.entry(name) {
      Entry::Occupied(entry) => {
        debug!(subreddit = %entry.key(), "subreddit already exists");
        Err(Error::AlreadyExists {
          kind: EntityKind::Subreddit,
          id:   entry.key().clone(),
        })
      }
      Entry::Vacant(entry) => {
        let subreddit = Subreddit::new(entry.key().clone(), description);
        info!(subreddit = %subreddit.name, "created new subreddit");
        Ok(entry.insert(subreddit).clone())
      }
    }
  }

  pub fn join_subreddit(&mut self, username: &str, subreddit: &str) -> Result<()> {
    if !self.users.contains_key(username) {
      debug!(%username, "no such user");
      return Err(Error::UserNotFound(username.to_owned()));
    }
    let Some(sub) = self.subreddits.get_mut(subreddit) else {
      debug!(%subreddit, "no such subreddit");
      return Err(Error::SubredditNotFound(subreddit.to_owned()));
    };

    if sub.members.insert(username.to_owned()) {
      info!(%username, %subreddit, "user joined subreddit");
    } else {
      debug!(%username, %subreddit, "user already a member");
    }
    Ok(())
  }

  pub fn leave_subreddit(&mut self, username: &str, subreddit: &str) -> Result<()> {
    let Some(sub) = self.subreddits.get_mut(subreddit) else {
      debug!(%subreddit, "no such subreddit");
      return Err(Error::SubredditNotFound(subreddit.to_owned()));
    };

    if sub.members.remove(username) {
      info!(%username, %subreddit, "user left subreddit");
    } else {
      debug!(%username, %subreddit, "user was not a member");
    }
    Ok(())
  }

  // ── Posts and comments ────────────────────────────────────────────────────

  pub fn create_post(&mut self, input: NewPost) -> Result<Post> {
    if !self.users.contains_key(&input.author) {
      debug!(author = %input.author, "no such user");
      return Err(Error::UserNotFound(input.author));
    }
    if !self.subreddits.contains_key(&input.subreddit) {
      debug!(subreddit = %input.subreddit, "no such subreddit");
      return Err(Error::SubredditNotFound(input.subreddit));
    }

    let post = Post {
      id:         self.next_post_id(&input.author),
      title:      input.title,
      content:    input.content,
      author:     input.author,
      subreddit:  input.subreddit,
      upvotes:    0,
      downvotes:  0,
      created_at: Utc::now(),
    };
    info!(
      id = %post.id,
      author = %post.author,
      subreddit = %post.subreddit,
      "created new post"
    );
    self.posts.insert(post.id.clone(), post.clone());
    Ok(post)
  }

  pub fn create_comment(&mut self, input: NewComment) -> Result<Comment> {
    if !self.users.contains_key(&input.author) {
      debug!(author = %input.author, "no such user");
      return Err(Error::UserNotFound(input.author));
    }
    if !self.posts.contains_key(&input.post_id) {
      debug!(post_id = %input.post_id, "no such post");
      return Err(Error::PostNotFound(input.post_id));
    }

    let comment = Comment {
      id:         self.next_comment_id(&input.author),
      content:    input.content,
      author:     input.author,
      post_id:    input.post_id,
      parent_id:  input.parent_id,
      upvotes:    0,
      downvotes:  0,
      created_at: Utc::now(),
    };
    info!(
      id = %comment.id,
      author = %comment.author,
      post_id = %comment.post_id,
      parent_id = ?comment.parent_id,
      "created new comment"
    );
    self.comments.insert(comment.id.clone(), comment.clone());
    Ok(comment)
  }

  pub fn list_comments(&self, post_id: &str) -> Result<Vec<Comment>> {
    if !self.posts.contains_key(post_id) {
      return Err(Error::PostNotFound(post_id.to_owned()));
    }
    Ok(
      self
        .comments
        .values()
        .filter(|c| c.post_id == post_id)
        .cloned()
        .collect(),
    )
  }

  // ── Votes ─────────────────────────────────────────────────────────────────

  pub fn vote(&mut self, vote: Vote, direction: VoteDirection) -> Result<VoteReceipt> {
    let media_type = MediaType::parse(&vote.media_type).inspect_err(|_| {
      debug!(media_type = %vote.media_type, "rejected vote with unknown media type");
    })?;

    let counters = match media_type {
      MediaType::Post => self
        .posts
        .get_mut(&vote.target_id)
        .map(|p| (&mut p.upvotes, &mut p.downvotes)),
      MediaType::Comment => self
        .comments
        .get_mut(&vote.target_id)
        .map(|c| (&mut c.upvotes, &mut c.downvotes)),
    };
    let Some((upvotes, downvotes)) = counters else {
      debug!(%media_type, target_id = %vote.target_id, "no such vote target");
      return Err(Error::TargetNotFound { media_type, id: vote.target_id });
    };

    match direction {
      VoteDirection::Up => *upvotes += 1,
      VoteDirection::Down => *downvotes += 1,
    }
    let receipt = VoteReceipt {
      media_type,
      target_id: vote.target_id,
      direction,
      upvotes: *upvotes,
      downvotes: *downvotes,
    };

    info!(
      voter = %vote.voter,
      %media_type,
      target_id = %receipt.target_id,
      "recorded {direction}"
    );
    Ok(receipt)
  }
}
