//! Error types for `intake-core`.

use thiserror::Error;

use crate::{intake::Violations, lead::LeadId};

#[derive(Debug, Error)]
pub enum Error {
  #[error("lead not found: {0}")]
  LeadNotFound(LeadId),

  #[error("submission rejected: {0}")]
  Validation(Violations),

  #[error("unknown lead status: {0:?}")]
  UnknownStatus(String),

  /// The storage backend failed; never produced by the core itself.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
