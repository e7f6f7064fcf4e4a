//! Server configuration: built-in defaults, then an optional TOML file, then
//! `FORUM_*` environment variables.

use std::{path::Path, time::Duration};

use anyhow::Context as _;
use forum_engine::EngineConfig;
use serde::Deserialize;

/// Top-level server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:               String,
  pub port:               u16,
  /// Commands the engine queues before submitters wait for room.
  pub queue_capacity:     usize,
  /// How long a request waits for the engine, in milliseconds.
  pub request_timeout_ms: u64,
}

impl ServerConfig {
  /// Load configuration, tolerating a missing file at `path`.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 8080_i64)?
      .set_default("queue_capacity", 1024_i64)?
      .set_default("request_timeout_ms", 1000_i64)?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("FORUM"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn engine_config(&self) -> EngineConfig {
    EngineConfig {
      queue_capacity:  self.queue_capacity,
      request_timeout: Duration::from_millis(self.request_timeout_ms),
    }
  }
}
