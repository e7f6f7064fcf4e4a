//! The JSON envelope every endpoint answers with.
//!
//! ```json
//! { "status": "success", "data": ... }
//! { "status": "error", "message": "...", "code": "user_not_found" }
//! ```

use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
  Success,
  Error,
}

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
  pub status:  Status,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub code:    Option<&'static str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data:    Option<T>,
}

impl<T> Envelope<T> {
  pub fn success(data: T) -> Self {
    Self { status: Status::Success, message: None, code: None, data: Some(data) }
  }
}

impl Envelope<()> {
  pub fn error(message: impl Into<String>, code: &'static str) -> Self {
    Self {
      status:  Status::Error,
      message: Some(message.into()),
      code:    Some(code),
      data:    None,
    }
  }
}

/// Wrap `data` in a success envelope.
pub fn success<T>(data: T) -> Json<Envelope<T>> { Json(Envelope::success(data)) }

/// Data returned when an entity with a generated id is created.
#[derive(Debug, Serialize)]
pub struct Created {
  pub id: String,
}
