//! Best-effort HTTP image download for the verid pipeline.
//!
//! One GET per image, no retry, no backoff. A non-success status or any
//! transport error is logged and becomes "unavailable" (`None`) — failure
//! never crosses the [`ImageFetcher`] boundary as an error. A lost image is
//! simply dropped from consideration; the orchestrator decides whether that
//! matters (mandatory front) or not (optional back).

use bytes::Bytes;
use tracing::{debug, warn};

use verid_core::media::ImageFetcher;

/// [`ImageFetcher`] backed by a shared [`reqwest::Client`].
///
/// Cloning is cheap — the inner client is reference-counted.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
  client: reqwest::Client,
}

impl HttpFetcher {
  pub fn new() -> Self {
    Self::default()
  }

  /// Use a caller-configured client (timeouts, proxies, TLS).
  pub fn with_client(client: reqwest::Client) -> Self {
    Self { client }
  }
}

impl ImageFetcher for HttpFetcher {
  async fn fetch(&self, url: &str) -> Option<Bytes> {
    let response = match self.client.get(url).send().await {
      Ok(response) => response,
      Err(err) => {
        warn!(url, error = %err, "document image download failed");
        return None;
      }
    };

    let status = response.status();
    if !status.is_success() {
      warn!(url, status = status.as_u16(), "document image download rejected");
      return None;
    }

    match response.bytes().await {
      Ok(body) => {
        debug!(url, bytes = body.len(), "downloaded document image");
        Some(body)
      }
      Err(err) => {
        warn!(url, error = %err, "document image body read failed");
        None
      }
    }
  }
}
