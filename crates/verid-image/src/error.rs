//! Error type for `verid-image`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The input bytes could not be decoded, or the output could not be
  /// encoded. Fatal for this one image only; the pipeline treats it as
  /// "unavailable".
  #[error("image codec error: {0}")]
  Codec(#[from] image::ImageError),

  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
