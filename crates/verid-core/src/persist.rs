//! The verification persister — orchestrates selection, resolution, image
//! acquisition, and the storage replace.
//!
//! One invocation handles one (person, verification result) pair. The steps
//! run in a fixed order; any missing required input before the replace step
//! ends the run in [`Outcome::Skipped`] with no mutation. Only storage
//! failures propagate as errors; everything expected-and-incomplete is a
//! skip, logged once at warning level.
//!
//! Dropping the returned future before the replace step leaves no persisted
//! side effect — the single `replace` call is the only write.

use tracing::{info, warn};

use crate::{
  country::CountryCodes,
  identification::{Identification, Image},
  location,
  media::{ImageCodec, ImageFetcher},
  person::Person,
  provider::VerificationResult,
  resolve, select,
  store::IdentityStore,
};
use uuid::Uuid;

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// Why a verification result was skipped. Expected and frequent; never an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
  /// No attempt with a usable front image (or no extracted data on the
  /// winning attempt) — typically the provider is still processing.
  NoUsableDocument,
  /// The extracted document category has no internal counterpart.
  UnmappedCategory,
  MissingIdNumber,
  MissingLocationCode,
  /// The mandatory front image could not be downloaded or decoded.
  FrontImageUnavailable,
}

impl SkipReason {
  /// Stable string for structured log fields.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::NoUsableDocument => "no_usable_document",
      Self::UnmappedCategory => "unmapped_category",
      Self::MissingIdNumber => "missing_id_number",
      Self::MissingLocationCode => "missing_location_code",
      Self::FrontImageUnavailable => "front_image_unavailable",
    }
  }
}

/// The terminal state of one pipeline run.
#[derive(Debug, Clone)]
pub enum Outcome {
  /// The person's identification was replaced with this record.
  Persisted(Identification),
  /// Nothing was mutated.
  Skipped(SkipReason),
}

impl Outcome {
  pub fn is_skipped(&self) -> bool {
    matches!(self, Self::Skipped(_))
  }
}

// ─── Persister ───────────────────────────────────────────────────────────────

/// Orchestrator over the storage, fetch, codec, and country-code
/// collaborators.
pub struct VerificationPersister<S, F, C, K> {
  store:     S,
  fetcher:   F,
  codec:     C,
  countries: K,
}

impl<S, F, C, K> VerificationPersister<S, F, C, K>
where
  S: IdentityStore,
  F: ImageFetcher,
  C: ImageCodec,
  K: CountryCodes,
{
  pub fn new(store: S, fetcher: F, codec: C, countries: K) -> Self {
    Self {
      store,
      fetcher,
      codec,
      countries,
    }
  }

  /// Process one verification result for one person.
  ///
  /// Returns `Ok(Outcome::Skipped(..))` for every expected-incompleteness
  /// case; `Err` only when the storage replace itself fails.
  pub async fn persist(
    &self,
    person: &Person,
    result: &VerificationResult,
  ) -> Result<Outcome, S::Error> {
    let Some(attempt) = select::usable_attempt(result) else {
      return Ok(self.skip(person, SkipReason::NoUsableDocument));
    };
    // The selector guarantees both bundles are present on the winner.
    let Some(extracted) = attempt.extracted.as_ref() else {
      return Ok(self.skip(person, SkipReason::NoUsableDocument));
    };
    let Some(images) = attempt.images.as_ref() else {
      return Ok(self.skip(person, SkipReason::NoUsableDocument));
    };

    let prior = self.store.current(person.person_id).await?;
    let prior = prior.as_ref();

    let Some(id_type) = resolve::id_type(extracted) else {
      return Ok(self.skip(person, SkipReason::UnmappedCategory));
    };
    let Some(id_number) = resolve::id_number(extracted, prior) else {
      return Ok(self.skip(person, SkipReason::MissingIdNumber));
    };
    let location_code = resolve::raw_location(id_type, extracted, prior, person)
      .and_then(|raw| location::normalize(&raw, id_type, &self.countries));
    let Some(location_code) = location_code else {
      return Ok(self.skip(person, SkipReason::MissingLocationCode));
    };

    // The selector only accepts attempts with a front URL.
    let Some(front_url) = images.front_url() else {
      return Ok(self.skip(person, SkipReason::FrontImageUnavailable));
    };
    let Some(front_image) = self.acquire(front_url).await else {
      return Ok(self.skip(person, SkipReason::FrontImageUnavailable));
    };

    // Best-effort: a missing back image never aborts the run.
    let back_image = match images.back_url() {
      Some(url) => self.acquire(url).await,
      None => None,
    };

    let identification = Identification {
      identification_id: Uuid::new_v4(),
      person_id: person.person_id,
      id_type,
      location_code,
      id_number,
      issue_date: resolve::issue_date(prior),
      expiration_date: resolve::expiration_date(extracted, prior),
      front_image,
      back_image,
    };

    self.store.replace(&identification).await?;
    info!(
      person_id = %person.person_id,
      identification_id = %identification.identification_id,
      id_type = identification.id_type.discriminant(),
      replaced_prior = prior.is_some(),
      "persisted identification from verification result"
    );
    Ok(Outcome::Persisted(identification))
  }

  /// Download and normalize one image; `None` on any failure.
  async fn acquire(&self, url: &str) -> Option<Image> {
    let raw = self.fetcher.fetch(url).await?;
    match self.codec.normalize(&raw) {
      Ok(image) => Some(image),
      Err(err) => {
        warn!(url, error = %err, "discarding undecodable document image");
        None
      }
    }
  }

  fn skip(&self, person: &Person, reason: SkipReason) -> Outcome {
    warn!(
      person_id = %person.person_id,
      reason = reason.as_str(),
      "skipping verification result"
    );
    Outcome::Skipped(reason)
  }
}
