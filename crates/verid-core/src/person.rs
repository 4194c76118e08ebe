//! Person — the subject of verification.
//!
//! A person is a thin envelope: an identifier plus an ordered list of
//! addresses. The identity record itself lives in [`Identification`]
//! (at most one per person) and is replaced wholesale by the persister.
//!
//! [`Identification`]: crate::identification::Identification

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role an address plays for the person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
  Primary,
  Mailing,
  Other,
}

/// A postal address, reduced to what the pipeline consumes: its kind tag and
/// the state/region code used as a last-resort issuing-jurisdiction fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
  pub kind:   AddressKind,
  /// State, province, or region code.
  pub region: Option<String>,
}

/// The subject a verification result is attached to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
  pub person_id: Uuid,
  pub addresses: Vec<Address>,
}

impl Person {
  /// Region of the primary-tagged address, if present and non-blank.
  pub fn primary_address_region(&self) -> Option<&str> {
    self
      .addresses
      .iter()
      .find(|a| a.kind == AddressKind::Primary)
      .and_then(|a| non_blank(a.region.as_deref()))
  }

  /// Region of the first address that has one, in stored order.
  pub fn first_address_region(&self) -> Option<&str> {
    self
      .addresses
      .iter()
      .find_map(|a| non_blank(a.region.as_deref()))
  }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
  s.map(str::trim).filter(|s| !s.is_empty())
}
