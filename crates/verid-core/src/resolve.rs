//! Field resolution — one small pure function per required field.
//!
//! Each field has its own fallback chain over (extracted data, prior
//! identification, person addresses), evaluated left-to-right with early
//! exit. Keeping the chains as separate functions keeps each rule
//! independently testable.

use chrono::NaiveDate;

use crate::{
  identification::{Identification, IdentificationType, LocationScope},
  person::Person,
  provider::ExtractedData,
};

/// Identification type comes from the extracted category alone — there is no
/// fallback to the prior record, because a re-verification may legitimately
/// switch document types.
pub fn id_type(extracted: &ExtractedData) -> Option<IdentificationType> {
  extracted.category.and_then(|c| c.identification_type())
}

/// Extracted id number, else the prior record's. Whitespace-only counts as
/// absent.
pub fn id_number(
  extracted: &ExtractedData,
  prior: Option<&Identification>,
) -> Option<String> {
  non_blank(extracted.id_number.as_deref())
    .map(str::to_owned)
    .or_else(|| prior.map(|p| p.id_number.clone()))
}

/// Issue date comes from the prior record only. The provider does not
/// reliably supply one, so this field is intentionally never taken from the
/// new extraction.
pub fn issue_date(prior: Option<&Identification>) -> Option<NaiveDate> {
  prior.and_then(|p| p.issue_date)
}

/// Extracted expiration date, else the prior record's.
pub fn expiration_date(
  extracted: &ExtractedData,
  prior: Option<&Identification>,
) -> Option<NaiveDate> {
  extracted
    .expiration_date
    .or_else(|| prior.and_then(|p| p.expiration_date))
}

/// The raw, pre-normalization location value.
///
/// State-scoped types fall back through the prior record and the person's
/// addresses; country-scoped types use the extracted issuing country only —
/// a physical address is not a valid proxy for the country that issued a
/// passport or residence document.
pub fn raw_location(
  id_type: IdentificationType,
  extracted: &ExtractedData,
  prior: Option<&Identification>,
  person: &Person,
) -> Option<String> {
  match id_type.scope() {
    LocationScope::State => non_blank(extracted.issuing_region.as_deref())
      .map(str::to_owned)
      .or_else(|| prior.map(|p| p.location_code.clone()))
      .or_else(|| person.primary_address_region().map(str::to_owned))
      .or_else(|| person.first_address_region().map(str::to_owned)),
    LocationScope::Country => {
      non_blank(extracted.issuing_country.as_deref()).map(str::to_owned)
    }
  }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
  s.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    identification::Image,
    person::{Address, AddressKind},
    provider::DocumentCategory,
  };
  use uuid::Uuid;

  fn prior(id_type: IdentificationType, location: &str) -> Identification {
    Identification {
      identification_id: Uuid::new_v4(),
      person_id: Uuid::new_v4(),
      id_type,
      location_code: location.to_owned(),
      id_number: "P123".into(),
      issue_date: NaiveDate::from_ymd_opt(2019, 4, 1),
      expiration_date: NaiveDate::from_ymd_opt(2029, 4, 1),
      front_image: Image {
        content_type: "image/jpeg".into(),
        data: vec![0xff],
      },
      back_image: None,
    }
  }

  fn person(addresses: Vec<Address>) -> Person {
    Person {
      person_id: Uuid::new_v4(),
      addresses,
    }
  }

  #[test]
  fn id_number_prefers_extraction() {
    let extracted = ExtractedData {
      id_number: Some("N999".into()),
      ..Default::default()
    };
    let p = prior(IdentificationType::Passport, "USA");
    assert_eq!(id_number(&extracted, Some(&p)).as_deref(), Some("N999"));
  }

  #[test]
  fn blank_id_number_falls_back_to_prior() {
    let extracted = ExtractedData {
      id_number: Some("   ".into()),
      ..Default::default()
    };
    let p = prior(IdentificationType::Passport, "USA");
    assert_eq!(id_number(&extracted, Some(&p)).as_deref(), Some("P123"));
  }

  #[test]
  fn id_number_absent_everywhere() {
    assert_eq!(id_number(&ExtractedData::default(), None), None);
  }

  #[test]
  fn issue_date_never_comes_from_extraction() {
    // There is no extracted issue date field at all; only the prior counts.
    let p = prior(IdentificationType::Passport, "USA");
    assert_eq!(issue_date(Some(&p)), NaiveDate::from_ymd_opt(2019, 4, 1));
    assert_eq!(issue_date(None), None);
  }

  #[test]
  fn expiration_prefers_extraction_then_prior() {
    let extracted = ExtractedData {
      expiration_date: NaiveDate::from_ymd_opt(2031, 1, 2),
      ..Default::default()
    };
    let p = prior(IdentificationType::Passport, "USA");
    assert_eq!(
      expiration_date(&extracted, Some(&p)),
      NaiveDate::from_ymd_opt(2031, 1, 2)
    );
    assert_eq!(
      expiration_date(&ExtractedData::default(), Some(&p)),
      NaiveDate::from_ymd_opt(2029, 4, 1)
    );
  }

  #[test]
  fn unmapped_category_resolves_to_no_type() {
    let extracted = ExtractedData {
      category: Some(DocumentCategory::Unknown),
      ..Default::default()
    };
    assert_eq!(id_type(&extracted), None);
    assert_eq!(id_type(&ExtractedData::default()), None);
  }

  #[test]
  fn state_location_chain_extraction_first() {
    let extracted = ExtractedData {
      issuing_region: Some("US-CA".into()),
      ..Default::default()
    };
    let p = prior(IdentificationType::DriversLicense, "NY");
    let who = person(vec![Address {
      kind: AddressKind::Primary,
      region: Some("TX".into()),
    }]);
    assert_eq!(
      raw_location(
        IdentificationType::DriversLicense,
        &extracted,
        Some(&p),
        &who
      )
      .as_deref(),
      Some("US-CA")
    );
  }

  #[test]
  fn state_location_falls_back_to_prior_then_addresses() {
    let who = person(vec![
      Address {
        kind: AddressKind::Mailing,
        region: Some("WA".into()),
      },
      Address {
        kind: AddressKind::Primary,
        region: Some("TX".into()),
      },
    ]);
    let p = prior(IdentificationType::DriversLicense, "NY");

    let from_prior = raw_location(
      IdentificationType::DriversLicense,
      &ExtractedData::default(),
      Some(&p),
      &who,
    );
    assert_eq!(from_prior.as_deref(), Some("NY"));

    // No prior: the primary-tagged address wins over stored order.
    let from_primary = raw_location(
      IdentificationType::DriversLicense,
      &ExtractedData::default(),
      None,
      &who,
    );
    assert_eq!(from_primary.as_deref(), Some("TX"));
  }

  #[test]
  fn state_location_uses_first_address_without_a_primary() {
    let who = person(vec![
      Address {
        kind: AddressKind::Mailing,
        region: None,
      },
      Address {
        kind: AddressKind::Other,
        region: Some("OR".into()),
      },
    ]);
    let got = raw_location(
      IdentificationType::StateId,
      &ExtractedData::default(),
      None,
      &who,
    );
    assert_eq!(got.as_deref(), Some("OR"));
  }

  #[test]
  fn country_location_never_falls_back_to_addresses() {
    let who = person(vec![Address {
      kind: AddressKind::Primary,
      region: Some("TX".into()),
    }]);
    let got = raw_location(
      IdentificationType::Passport,
      &ExtractedData::default(),
      None,
      &who,
    );
    assert_eq!(got, None);
  }
}
