//! The `IdentityStore` trait — the storage collaborator boundary.
//!
//! The trait is implemented by storage backends (e.g. `verid-store-sqlite`).
//! The persister depends on this abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::identification::Identification;

/// Abstraction over identification storage.
///
/// The record is an owned aggregate: [`replace`](IdentityStore::replace)
/// removes whatever identification the person currently has (images
/// included) and attaches the new one, as a single all-or-nothing unit of
/// work. There is no field-level update — "exactly one identification per
/// person" holds by construction.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait IdentityStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The person's current identification, if any.
  fn current(
    &self,
    person_id: Uuid,
  ) -> impl Future<Output = Result<Option<Identification>, Self::Error>> + Send + '_;

  /// Remove the person's prior identification (and its images) and attach
  /// `new`, atomically. Concurrent replacements for the same person are
  /// resolved by the backend (last writer wins); callers invoke this at most
  /// once per pipeline run.
  fn replace<'a>(
    &'a self,
    new: &'a Identification,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
