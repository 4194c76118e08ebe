//! SQLite backend for the verid identity store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! pool without blocking the async runtime. The replace operation runs in a
//! single transaction: prior identification and its images out, new aggregate
//! in, all or nothing.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
