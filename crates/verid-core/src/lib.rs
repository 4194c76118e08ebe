//! Core types, collaborator traits, and pipeline logic for the verid
//! identity-verification ingestion pipeline.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod country;
pub mod error;
pub mod identification;
pub mod location;
pub mod media;
pub mod persist;
pub mod person;
pub mod provider;
pub mod resolve;
pub mod select;
pub mod store;

pub use error::{Error, Result};
