//! Feed projection over the current store contents.

use forum_core::feed::{PostSummary, UserFeed};
use tracing::debug;

use crate::state::EntityStore;

impl EntityStore {
  /// Every post whose subreddit counts `username` among its members, in post
  /// creation order.
  ///
  /// Full scan over posts; membership is looked up per post.
  pub fn user_feed(&self, username: &str) -> UserFeed {
    if !self.users.contains_key(username) {
      debug!(%username, "feed requested for unknown user");
      return UserFeed::UnknownUser;
    }

    let posts: Vec<PostSummary> = self
      .posts
      .values()
      .filter(|post| {
        self
          .subreddits
          .get(&post.subreddit)
          .is_some_and(|sub| sub.is_member(username))
      })
      .map(PostSummary::from)
      .collect();

    debug!(%username, entries = posts.len(), "feed fetched");
    UserFeed::Posts(posts)
  }
}
