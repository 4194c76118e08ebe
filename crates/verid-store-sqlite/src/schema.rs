//! Database schema.
//!
//! `person_id` is UNIQUE on `identifications`: "at most one identification
//! per person" holds by construction, not by application discipline. Images
//! are owned rows — they exist only while an identification references them
//! and are deleted in the same transaction that deletes the identification.

pub const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS images (
  image_id     TEXT PRIMARY KEY,
  content_type TEXT NOT NULL,
  data         BLOB NOT NULL
);

CREATE TABLE IF NOT EXISTS identifications (
  identification_id TEXT PRIMARY KEY,
  person_id         TEXT NOT NULL UNIQUE,
  id_type           TEXT NOT NULL,
  location_code     TEXT NOT NULL,
  id_number         TEXT NOT NULL,
  issue_date        TEXT,
  expiration_date   TEXT,
  front_image_id    TEXT NOT NULL REFERENCES images (image_id),
  back_image_id     TEXT REFERENCES images (image_id)
);
";
