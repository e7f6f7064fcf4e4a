//! Core types and trait definitions for the forum engine.
//!
//! This crate is deliberately free of HTTP and runtime dependencies.
//! All other crates depend on it; it holds the entity model, the error
//! taxonomy, and the [`store::ForumStore`] abstraction.

pub mod error;
pub mod feed;
pub mod model;
pub mod store;
pub mod vote;

pub use error::{Error, Result};
