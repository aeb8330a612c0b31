//! Hash record definitions.

use serde::{Deserialize, Serialize};

/// A single row of the `hashes` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashRecord {
    /// File path, unique within the store.
    pub path: String,
    /// Lowercase hex SHA-256 digest of the file content.
    pub hash: String,
}

impl HashRecord {
    /// Create a new record.
    #[must_use]
    pub fn new(path: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            hash: hash.into(),
        }
    }
}
