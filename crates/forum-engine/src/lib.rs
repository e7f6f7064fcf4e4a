//! In-memory backend for the forum engine.
//!
//! All entities live in one [`EntityStore`] owned by a single worker task
//! ([`Engine`]). Callers talk to it through an [`EngineHandle`], which
//! implements [`forum_core::store::ForumStore`]; every request is applied in
//! arrival order, one at a time, so no locking is needed anywhere.

mod command;
mod engine;
mod feed;
mod processor;
mod state;

pub mod error;

pub use engine::{Engine, EngineConfig, EngineHandle};
pub use error::{Error, Result};
pub use state::EntityStore;

#[cfg(test)]
mod tests;
