//! Error type for `intake-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown {column} value in database: {value:?}")]
  UnknownValue {
    column: &'static str,
    value:  String,
  },

  #[error("lead id out of range: {0}")]
  IdOutOfRange(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
