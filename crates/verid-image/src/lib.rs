//! Image normalization for the verid pipeline.
//!
//! Turns whatever the provider serves (JPEG/PNG/WebP, arbitrary size,
//! EXIF-rotated, possibly transparent) into the one persisted form: upright,
//! 720px on the constrained dimension, opaque, JPEG.

mod normalize;

pub mod error;

pub use error::{Error, Result};
pub use normalize::JpegNormalizer;
