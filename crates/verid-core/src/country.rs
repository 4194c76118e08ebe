//! Country-code lookup — the alpha-2 → alpha-3 collaborator.
//!
//! The provider reports issuing countries in ISO 3166 alpha-2; the persisted
//! format is alpha-3. The trait keeps the reference data swappable; the
//! shipped implementation is backed by the `rust_iso3166` table.

/// Abstraction over ISO 3166 country-code reference data.
pub trait CountryCodes: Send + Sync {
  /// Resolve an alpha-2 code to its alpha-3 form. Returns `None` when the
  /// input is not a known alpha-2 code.
  fn alpha3(&self, alpha2: &str) -> Option<String>;
}

/// [`CountryCodes`] backed by the bundled ISO 3166-1 table.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoCountries;

impl CountryCodes for IsoCountries {
  fn alpha3(&self, alpha2: &str) -> Option<String> {
    rust_iso3166::from_alpha2(alpha2).map(|c| c.alpha3.to_owned())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn known_alpha2_resolves() {
    assert_eq!(IsoCountries.alpha3("US").as_deref(), Some("USA"));
    assert_eq!(IsoCountries.alpha3("DE").as_deref(), Some("DEU"));
  }

  #[test]
  fn unknown_code_yields_none() {
    assert_eq!(IsoCountries.alpha3("ZZ"), None);
    // Already alpha-3: not an alpha-2 code, so no substitution.
    assert_eq!(IsoCountries.alpha3("USA"), None);
  }
}
