//! Record store for known-good file hashes.
//!
//! Each target directory owns one SQLite file holding a single table:
//!
//! ```sql
//! CREATE TABLE hashes (path TEXT PRIMARY KEY, hash TEXT)
//! ```
//!
//! # Architecture
//!
//! * [`database`]: SQLite persistence, one connection per operation.
//! * [`entry`]: The [`HashRecord`] row type.
//!
//! # Failure Semantics
//!
//! Every storage failure is returned as a [`StoreError`], never folded into
//! an empty result. `Ok(false)` from [`HashStore::contains`] and `Ok(vec![])`
//! from [`HashStore::list_all`] always mean the data is genuinely absent.

pub mod database;
pub mod entry;

pub use database::{HashStore, StoreError, StoreResult, DEFAULT_STORE_NAME};
pub use entry::HashRecord;
