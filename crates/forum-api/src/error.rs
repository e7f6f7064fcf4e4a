//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use forum_core::store::StoreError;
use thiserror::Error;

use crate::response::Envelope;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// A domain outcome reported by the store (missing entity, taken name, ...).
  #[error("{0}")]
  Domain(forum_core::Error),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// The store could not answer at all (stopped, timed out).
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a backend error: domain outcomes keep their identity, anything
  /// else becomes [`ApiError::Store`].
  pub fn from_store<E: StoreError>(err: E) -> Self {
    match err.domain() {
      Some(domain) => ApiError::Domain(domain.clone()),
      None => ApiError::Store(Box::new(err)),
    }
  }

  pub fn status(&self) -> StatusCode {
    use forum_core::Error as D;
    match self {
      ApiError::Domain(D::AlreadyExists { .. }) => StatusCode::CONFLICT,
      ApiError::Domain(
        D::UserNotFound(_)
        | D::SubredditNotFound(_)
        | D::PostNotFound(_)
        | D::TargetNotFound { .. }
        | D::RecipientNotFound(_)
        | D::SenderNotFound(_),
      ) => StatusCode::NOT_FOUND,
      ApiError::Domain(D::InvalidMediaType(_)) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
  }

  /// Machine-readable code carried in the error envelope.
  pub fn code(&self) -> &'static str {
    match self {
      ApiError::Domain(e) => e.code(),
      ApiError::NotFound(_) => "not_found",
      ApiError::BadRequest(_) => "bad_request",
      ApiError::Store(_) => "unavailable",
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let message = match &self {
      ApiError::Domain(e) => e.to_string(),
      ApiError::NotFound(m) | ApiError::BadRequest(m) => m.clone(),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store unavailable");
        e.to_string()
      }
    };
    (status, Json(Envelope::<()>::error(message, self.code()))).into_response()
  }
}
