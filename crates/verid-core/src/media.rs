//! Image collaborator traits — fetching and normalization.
//!
//! Implemented by `verid-fetch` (HTTP) and `verid-image` (codec). The
//! orchestrator depends on these abstractions, not on any concrete backend.

use std::future::Future;

use bytes::Bytes;

use crate::identification::Image;

/// Best-effort download of a remote image.
///
/// One GET, no retry, no backoff: any non-success status or transport error
/// is logged by the implementation and surfaces here as `None`. Failure never
/// crosses this boundary as an error — a failed download simply removes that
/// image from consideration.
pub trait ImageFetcher: Send + Sync {
  fn fetch<'a>(
    &'a self,
    url: &'a str,
  ) -> impl Future<Output = Option<Bytes>> + Send + 'a;
}

/// Canonicalization of raw image bytes into the persisted form: upright,
/// 720px on the constrained dimension, opaque, JPEG.
///
/// A decode failure is an `Err` — fatal for that one image, not for the
/// pipeline. The orchestrator maps it to "unavailable", which skips the whole
/// operation only when the image is the mandatory front.
pub trait ImageCodec: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn normalize(&self, raw: &[u8]) -> Result<Image, Self::Error>;
}
