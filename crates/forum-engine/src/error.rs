//! Error type for `forum-engine`.

use std::time::Duration;

use forum_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{0}")]
  Domain(#[from] forum_core::Error),

  /// The worker has stopped and no longer accepts commands.
  #[error("engine is not running")]
  Closed,

  /// No reply arrived within the configured request timeout. The command may
  /// still be applied once the worker reaches it.
  #[error("no reply from engine within {0:?}")]
  Timeout(Duration),
}

impl StoreError for Error {
  fn domain(&self) -> Option<&forum_core::Error> {
    match self {
      Error::Domain(e) => Some(e),
      Error::Closed | Error::Timeout(_) => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
