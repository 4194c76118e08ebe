//! Provider input types — the verification result as delivered by the
//! external verification provider, already deserialized.
//!
//! Everything here is read-only to the pipeline and transient: attempts are
//! never persisted as such, only the single record derived from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::identification::IdentificationType;

// ─── Document category ───────────────────────────────────────────────────────

/// The provider's document taxonomy. A closed set on our side; categories the
/// provider adds later land on `Unknown` and are treated as unmapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
  DriversLicense,
  IdCard,
  Passport,
  ResidencePermit,
  ResidentCard,
  Visa,
  #[serde(other)]
  Unknown,
}

impl DocumentCategory {
  /// The one explicit join between the provider's taxonomy and ours.
  /// Returns `None` for every category without an internal counterpart,
  /// which aborts the persist operation upstream.
  pub fn identification_type(self) -> Option<IdentificationType> {
    match self {
      Self::DriversLicense => Some(IdentificationType::DriversLicense),
      Self::IdCard => Some(IdentificationType::StateId),
      Self::Passport => Some(IdentificationType::Passport),
      Self::ResidencePermit | Self::ResidentCard | Self::Visa => {
        Some(IdentificationType::ResidentId)
      }
      Self::Unknown => None,
    }
  }
}

// ─── Verification result ─────────────────────────────────────────────────────

/// URLs of the captured document faces. All optional — the provider omits
/// whichever variants its processing did not produce.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageUrls {
  pub front_original: Option<String>,
  pub front_cropped:  Option<String>,
  pub back_original:  Option<String>,
  pub back_cropped:   Option<String>,
}

impl ImageUrls {
  /// Whether this bundle carries a usable front image URL.
  pub fn has_front(&self) -> bool {
    self.front_url().is_some()
  }

  /// The front URL to download: original preferred, cropped as fallback.
  pub fn front_url(&self) -> Option<&str> {
    non_blank(self.front_original.as_deref())
      .or_else(|| non_blank(self.front_cropped.as_deref()))
  }

  /// The back URL to download, same preference order as the front.
  pub fn back_url(&self) -> Option<&str> {
    non_blank(self.back_original.as_deref())
      .or_else(|| non_blank(self.back_cropped.as_deref()))
  }
}

/// OCR/extraction output for one attempt. Every field is optional — OCR
/// confidence varies and the provider sends only what it could read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedData {
  pub category:        Option<DocumentCategory>,
  pub id_number:       Option<String>,
  /// Issuing state/province as reported, raw and pre-normalization.
  pub issuing_region:  Option<String>,
  /// Issuing country as reported, typically alpha-2.
  pub issuing_country: Option<String>,
  pub expiration_date: Option<NaiveDate>,
}

/// One capture/submission of a document. A verification may contain several
/// due to retries; only the latest usable one is authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAttempt {
  pub ordinal:   u32,
  pub images:    Option<ImageUrls>,
  pub extracted: Option<ExtractedData>,
}

/// The provider's verification result for one person.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationResult {
  pub attempts: Vec<DocumentAttempt>,
}

fn non_blank(s: Option<&str>) -> Option<&str> {
  s.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn category_mapping_is_exhaustive_over_known_categories() {
    assert_eq!(
      DocumentCategory::DriversLicense.identification_type(),
      Some(IdentificationType::DriversLicense)
    );
    assert_eq!(
      DocumentCategory::IdCard.identification_type(),
      Some(IdentificationType::StateId)
    );
    assert_eq!(
      DocumentCategory::Passport.identification_type(),
      Some(IdentificationType::Passport)
    );
    assert_eq!(
      DocumentCategory::ResidencePermit.identification_type(),
      Some(IdentificationType::ResidentId)
    );
    assert_eq!(
      DocumentCategory::ResidentCard.identification_type(),
      Some(IdentificationType::ResidentId)
    );
    assert_eq!(
      DocumentCategory::Visa.identification_type(),
      Some(IdentificationType::ResidentId)
    );
  }

  #[test]
  fn unknown_category_has_no_mapping() {
    assert_eq!(DocumentCategory::Unknown.identification_type(), None);
  }

  #[test]
  fn front_url_prefers_original_over_cropped() {
    let urls = ImageUrls {
      front_original: Some("https://img.test/orig.jpg".into()),
      front_cropped: Some("https://img.test/crop.jpg".into()),
      ..Default::default()
    };
    assert_eq!(urls.front_url(), Some("https://img.test/orig.jpg"));
  }

  #[test]
  fn blank_front_original_falls_back_to_cropped() {
    let urls = ImageUrls {
      front_original: Some("   ".into()),
      front_cropped: Some("https://img.test/crop.jpg".into()),
      ..Default::default()
    };
    assert_eq!(urls.front_url(), Some("https://img.test/crop.jpg"));
    assert!(urls.has_front());
  }

  #[test]
  fn no_front_url_at_all() {
    let urls = ImageUrls::default();
    assert_eq!(urls.front_url(), None);
    assert!(!urls.has_front());
  }
}
