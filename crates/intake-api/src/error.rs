//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error body has the shape
//! `{"success": false, "error": "<kind>", "message": "..."}` so callers can
//! tell a missing lead from a rejected submission from a backend failure.

use axum::{
  Json,
  extract::{
    multipart::MultipartRejection,
    rejection::{JsonRejection, PathRejection, QueryRejection},
  },
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use intake_core::intake::Violations;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("validation failed: {0}")]
  Validation(Violations),

  #[error("unauthorized")]
  Unauthorized,

  /// The store collaborator failed (I/O, database, ...).
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// The machine-readable `error` field of the response body.
  pub fn kind(&self) -> &'static str {
    match self {
      ApiError::NotFound(_) => "NotFound",
      ApiError::BadRequest(_) => "BadRequest",
      ApiError::Validation(_) => "ValidationFailed",
      ApiError::Unauthorized => "Unauthorized",
      ApiError::Store(_) => "TransportFailure",
    }
  }
}

impl From<intake_core::Error> for ApiError {
  fn from(e: intake_core::Error) -> Self {
    use intake_core::Error as E;
    match e {
      E::LeadNotFound(id) => ApiError::NotFound(format!("lead {id}")),
      E::Validation(v) => ApiError::Validation(v),
      e @ E::UnknownStatus(_) => ApiError::BadRequest(e.to_string()),
      E::Store(inner) => ApiError::Store(inner),
    }
  }
}

// Extractor rejections all become 400s.

impl From<PathRejection> for ApiError {
  fn from(r: PathRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(r: QueryRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl From<JsonRejection> for ApiError {
  fn from(r: JsonRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl From<MultipartRejection> for ApiError {
  fn from(r: MultipartRejection) -> Self {
    ApiError::BadRequest(r.body_text())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };

    let mut body = json!({
      "success": false,
      "error":   self.kind(),
      "message": self.to_string(),
    });
    if let ApiError::Validation(violations) = &self {
      body["violations"] = json!(violations);
    }

    let mut res = (status, Json(body)).into_response();
    if matches!(self, ApiError::Unauthorized) {
      res.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"intake\""),
      );
    }
    res
  }
}
