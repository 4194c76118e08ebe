//! Location-code normalization — canonicalizing raw jurisdiction strings.
//!
//! Providers are inconsistent about jurisdiction formats: state codes arrive
//! as `CA`, `US-CA`, or full names; country codes arrive as alpha-2, alpha-3,
//! or malformed longer strings. The rules here reduce all of those to the
//! persisted forms: a 2-letter state code or an alpha-3 country code.

use crate::{
  country::CountryCodes,
  identification::{IdentificationType, LocationScope},
};

/// Canonicalize a raw location string for the given identification type.
/// Absent or blank input yields `None`.
pub fn normalize<K: CountryCodes + ?Sized>(
  raw: &str,
  id_type: IdentificationType,
  countries: &K,
) -> Option<String> {
  match id_type.scope() {
    LocationScope::State => normalize_state(raw),
    LocationScope::Country => normalize_country(raw, countries),
  }
}

/// State scope: trim, take the segment after the last hyphen (some providers
/// emit `US-CA`), clamp to the LAST 2 characters, uppercase.
///
/// The last-2 clamp is deliberate and load-bearing: `"California"` becomes
/// `"IA"`, not `"CA"`. Do not change it to a first-2 clamp.
fn normalize_state(raw: &str) -> Option<String> {
  let segment = raw.trim().rsplit('-').next()?;
  let chars: Vec<char> = segment.chars().collect();
  if chars.is_empty() {
    return None;
  }
  let start = chars.len().saturating_sub(2);
  Some(chars[start..].iter().collect::<String>().to_uppercase())
}

/// Country scope: trim and uppercase; clamp anything longer than 3
/// characters to its FIRST 3; then substitute alpha-2 → alpha-3 through the
/// lookup collaborator. A failed lookup (e.g. the value is already alpha-3)
/// keeps the clamped value.
fn normalize_country<K: CountryCodes + ?Sized>(
  raw: &str,
  countries: &K,
) -> Option<String> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return None;
  }
  let upper = trimmed.to_uppercase();
  let clamped: String = upper.chars().take(3).collect();
  Some(countries.alpha3(&clamped).unwrap_or(clamped))
}
