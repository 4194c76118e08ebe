//! [`SqliteStore`] — the SQLite implementation of [`IdentityStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use verid_core::{identification::Identification, store::IdentityStore};

use crate::{
  Error, Result,
  encode::{RawIdentification, encode_date, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An identity store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  #[cfg(test)]
  pub(crate) async fn count(&self, table: &'static str) -> Result<i64> {
    let n = self
      .conn
      .call(move |conn| {
        let n: i64 =
          conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| {
            r.get(0)
          })?;
        Ok(n)
      })
      .await?;
    Ok(n)
  }
}

// ─── IdentityStore impl ──────────────────────────────────────────────────────

impl IdentityStore for SqliteStore {
  type Error = Error;

  async fn current(&self, person_id: Uuid) -> Result<Option<Identification>> {
    let pid = encode_uuid(person_id);

    let raw: Option<RawIdentification> = self
      .conn
      .call(move |conn| {
        let raw = conn
          .query_row(
            "SELECT i.identification_id, i.person_id, i.id_type,
                    i.location_code, i.id_number, i.issue_date,
                    i.expiration_date,
                    f.content_type, f.data,
                    b.content_type, b.data
             FROM identifications i
             JOIN images f ON f.image_id = i.front_image_id
             LEFT JOIN images b ON b.image_id = i.back_image_id
             WHERE i.person_id = ?1",
            rusqlite::params![pid],
            |row| {
              Ok(RawIdentification {
                identification_id: row.get(0)?,
                person_id: row.get(1)?,
                id_type: row.get(2)?,
                location_code: row.get(3)?,
                id_number: row.get(4)?,
                issue_date: row.get(5)?,
                expiration_date: row.get(6)?,
                front_content_type: row.get(7)?,
                front_data: row.get(8)?,
                back_content_type: row.get(9)?,
                back_data: row.get(10)?,
              })
            },
          )
          .optional()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawIdentification::decode).transpose()
  }

  async fn replace(&self, new: &Identification) -> Result<()> {
    let id_str = encode_uuid(new.identification_id);
    let pid_str = encode_uuid(new.person_id);
    let type_str = new.id_type.discriminant().to_owned();
    let location = new.location_code.clone();
    let number = new.id_number.clone();
    let issue = new.issue_date.map(encode_date);
    let expiration = new.expiration_date.map(encode_date);
    let front_id = encode_uuid(Uuid::new_v4());
    let front_ct = new.front_image.content_type.clone();
    let front_data = new.front_image.data.clone();
    let back = new.back_image.as_ref().map(|img| {
      (
        encode_uuid(Uuid::new_v4()),
        img.content_type.clone(),
        img.data.clone(),
      )
    });

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        // Remove the prior aggregate: identification row first (it holds the
        // foreign keys), then its now-unreferenced images.
        let old: Option<(String, Option<String>)> = tx
          .query_row(
            "SELECT front_image_id, back_image_id
             FROM identifications WHERE person_id = ?1",
            rusqlite::params![pid_str],
            |row| Ok((row.get(0)?, row.get(1)?)),
          )
          .optional()?;
        if let Some((old_front, old_back)) = old {
          tx.execute(
            "DELETE FROM identifications WHERE person_id = ?1",
            rusqlite::params![pid_str],
          )?;
          tx.execute(
            "DELETE FROM images WHERE image_id = ?1",
            rusqlite::params![old_front],
          )?;
          if let Some(old_back) = old_back {
            tx.execute(
              "DELETE FROM images WHERE image_id = ?1",
              rusqlite::params![old_back],
            )?;
          }
        }

        tx.execute(
          "INSERT INTO images (image_id, content_type, data)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![front_id, front_ct, front_data],
        )?;
        let back_id = match &back {
          Some((back_id, back_ct, back_data)) => {
            tx.execute(
              "INSERT INTO images (image_id, content_type, data)
               VALUES (?1, ?2, ?3)",
              rusqlite::params![back_id, back_ct, back_data],
            )?;
            Some(back_id.clone())
          }
          None => None,
        };

        tx.execute(
          "INSERT INTO identifications
             (identification_id, person_id, id_type, location_code,
              id_number, issue_date, expiration_date,
              front_image_id, back_image_id)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            id_str,
            pid_str,
            type_str,
            location,
            number,
            issue,
            expiration,
            front_id,
            back_id
          ],
        )?;

        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
