//! HTTP Basic-auth extractor for the review endpoints.
//!
//! Credentials are checked against an argon2 PHC hash supplied by
//! configuration. Public endpoints (intake, vocabulary) don't use it.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;

use intake_core::store::LeadStore;

use crate::{AppState, error::ApiError};

/// Credentials accepted for reviewers of this instance.
#[derive(Clone)]
pub struct AuthConfig {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

impl std::fmt::Debug for AuthConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AuthConfig")
      .field("username", &self.username)
      .finish_non_exhaustive()
  }
}

/// Present in a handler means the request carried valid reviewer credentials.
/// Holds the authenticated username.
#[derive(Debug)]
pub struct Reviewer(pub String);

/// Verify Basic credentials from `headers`, returning the username.
pub fn verify_auth(
  headers: &HeaderMap,
  config: &AuthConfig,
) -> Result<String, ApiError> {
  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(ApiError::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| ApiError::Unauthorized)?;
  let creds = std::str::from_utf8(&decoded).map_err(|_| ApiError::Unauthorized)?;

  let (username, password) =
    creds.split_once(':').ok_or(ApiError::Unauthorized)?;

  if username != config.username {
    return Err(ApiError::Unauthorized);
  }

  let parsed_hash = PasswordHash::new(&config.password_hash)
    .map_err(|_| ApiError::Unauthorized)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| ApiError::Unauthorized)?;

  Ok(username.to_owned())
}

impl<S> FromRequestParts<AppState<S>> for Reviewer
where
  S: LeadStore + Clone + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    match verify_auth(&parts.headers, &state.auth) {
      Ok(username) => Ok(Reviewer(username)),
      Err(e) => {
        tracing::debug!(uri = %parts.uri, "rejected reviewer credentials");
        Err(e)
      }
    }
  }
}
