//! Error types for `verid-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown identification type discriminant: {0:?}")]
  UnknownIdentificationType(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
