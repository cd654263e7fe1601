//! Error types for the SQLite store.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("document encoding error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("could not parse stored timestamp: {0}")]
  DateParse(String),

  #[error("unknown category tag {0:?} in stored row")]
  UnknownCategory(String),
}
