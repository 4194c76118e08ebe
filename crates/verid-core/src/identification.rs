//! Identification — the canonical persisted identity record.
//!
//! A person owns at most one identification at a time. The record is never
//! edited field-by-field: the persister builds a complete replacement and
//! hands it to the store, which removes the old aggregate and attaches the
//! new one as a single unit of work.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Identification type ─────────────────────────────────────────────────────

/// The internal closed set of supported document types. Distinct from the
/// provider's category set; the two are joined only by
/// [`DocumentCategory::identification_type`](crate::provider::DocumentCategory::identification_type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentificationType {
  DriversLicense,
  StateId,
  Passport,
  ResidentId,
}

/// What kind of jurisdiction issues a given document type. Drives both the
/// location fallback chain and the normalization rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationScope {
  /// Issued by a state/province; location code is a 2-letter state code.
  State,
  /// Issued by a country; location code is an alpha-3 country code.
  Country,
}

impl IdentificationType {
  pub fn scope(self) -> LocationScope {
    match self {
      Self::DriversLicense | Self::StateId => LocationScope::State,
      Self::Passport | Self::ResidentId => LocationScope::Country,
    }
  }

  /// The discriminant string stored in the `id_type` column.
  /// Must match the `rename_all = "snake_case"` serde tags above.
  pub fn discriminant(self) -> &'static str {
    match self {
      Self::DriversLicense => "drivers_license",
      Self::StateId => "state_id",
      Self::Passport => "passport",
      Self::ResidentId => "resident_id",
    }
  }

  pub fn from_discriminant(s: &str) -> Result<Self> {
    match s {
      "drivers_license" => Ok(Self::DriversLicense),
      "state_id" => Ok(Self::StateId),
      "passport" => Ok(Self::Passport),
      "resident_id" => Ok(Self::ResidentId),
      other => Err(Error::UnknownIdentificationType(other.to_owned())),
    }
  }
}

// ─── Image ───────────────────────────────────────────────────────────────────

/// A normalized document image. Immutable once created; owned exclusively by
/// the identification that references it and removed along with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
  pub content_type: String,
  pub data:         Vec<u8>,
}

// ─── Identification ──────────────────────────────────────────────────────────

/// The persisted identity record.
///
/// Invariant: exactly one per person at any time. The meaning of
/// `location_code` depends on `id_type` — a 2-letter state code for
/// state-scoped types, an alpha-3 country code for country-scoped ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identification {
  pub identification_id: Uuid,
  pub person_id:         Uuid,
  pub id_type:           IdentificationType,
  pub location_code:     String,
  /// Opaque document number as printed; never normalized.
  pub id_number:         String,
  pub issue_date:        Option<NaiveDate>,
  pub expiration_date:   Option<NaiveDate>,
  pub front_image:       Image,
  pub back_image:        Option<Image>,
}
