//! Error types for `ken-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("cannot start a quiz with no questions")]
  EmptyQuiz,

  #[error("at least one category must stay selected")]
  NoCategoriesSelected,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
