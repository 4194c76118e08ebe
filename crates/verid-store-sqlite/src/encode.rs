//! Conversions between domain types and their SQLite column representations.

use chrono::NaiveDate;
use uuid::Uuid;

use verid_core::identification::{Identification, IdentificationType, Image};

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_uuid(id: Uuid) -> String {
  id.to_string()
}

pub fn encode_date(date: NaiveDate) -> String {
  date.format(DATE_FORMAT).to_string()
}

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

/// An identification row joined with its image rows, still in column form.
pub struct RawIdentification {
  pub identification_id: String,
  pub person_id:         String,
  pub id_type:           String,
  pub location_code:     String,
  pub id_number:         String,
  pub issue_date:        Option<String>,
  pub expiration_date:   Option<String>,
  pub front_content_type: String,
  pub front_data:        Vec<u8>,
  pub back_content_type: Option<String>,
  pub back_data:         Option<Vec<u8>>,
}

impl RawIdentification {
  pub fn decode(self) -> Result<Identification> {
    let back_image = match (self.back_content_type, self.back_data) {
      (Some(content_type), Some(data)) => Some(Image { content_type, data }),
      _ => None,
    };
    Ok(Identification {
      identification_id: Uuid::parse_str(&self.identification_id)?,
      person_id: Uuid::parse_str(&self.person_id)?,
      id_type: IdentificationType::from_discriminant(&self.id_type)?,
      location_code: self.location_code,
      id_number: self.id_number,
      issue_date: self.issue_date.as_deref().map(decode_date).transpose()?,
      expiration_date: self
        .expiration_date
        .as_deref()
        .map(decode_date)
        .transpose()?,
      front_image: Image {
        content_type: self.front_content_type,
        data: self.front_data,
      },
      back_image,
    })
  }
}
