//! SQLite-backed hash store.
//!
//! The store never holds a connection between calls: every operation opens
//! the database, runs one statement, and drops the connection. Inserts are
//! therefore individually committed, and a run that is interrupted keeps
//! every record written before the interrupt.

use rusqlite::{params, Connection, ErrorCode, OpenFlags, OptionalExtension};
use std::path::{Path, PathBuf};

use super::entry::HashRecord;

/// Default file name of the store inside a target directory.
pub const DEFAULT_STORE_NAME: &str = "hashmyfiles.db";

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS hashes (path TEXT PRIMARY KEY, hash TEXT)";
const EXISTS_SQL: &str = "SELECT 1 FROM hashes WHERE path = ?1 LIMIT 1";
const LIST_SQL: &str = "SELECT path, hash FROM hashes ORDER BY path";
const INSERT_SQL: &str = "INSERT INTO hashes (path, hash) VALUES (?1, ?2)";
const COUNT_SQL: &str = "SELECT COUNT(*) FROM hashes";

/// Errors raised by the hash store.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// The store file does not exist yet.
    #[error("Hash store not found: {0}")]
    Missing(PathBuf),

    /// A record for this path is already present.
    #[error("A hash is already stored for {0}")]
    DuplicatePath(String),

    /// The underlying SQLite call failed.
    #[error("SQLite error in {path}: {source}")]
    Sqlite {
        /// Store file the statement ran against
        path: PathBuf,
        /// The underlying SQLite error
        #[source]
        source: rusqlite::Error,
    },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistent path -> hash mapping for one target directory.
#[derive(Debug, Clone)]
pub struct HashStore {
    path: PathBuf,
}

impl HashStore {
    /// Create a handle to the store file at `path`.
    ///
    /// Nothing is touched on disk until an operation runs.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Create a handle to `store_name` inside `directory`.
    #[must_use]
    pub fn in_directory(directory: &Path, store_name: &str) -> Self {
        Self::new(&directory.join(store_name))
    }

    /// Path of the store file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the store file exists on disk.
    #[must_use]
    pub fn exists_on_disk(&self) -> bool {
        self.path.is_file()
    }

    /// Create the `hashes` table if it is absent.
    ///
    /// Creates the database file on first use. Calling this on an already
    /// initialized store is a no-op.
    pub fn initialize(&self) -> StoreResult<()> {
        let conn = Connection::open(&self.path).map_err(|e| self.sqlite_error(e))?;
        conn.execute(CREATE_TABLE_SQL, [])
            .map_err(|e| self.sqlite_error(e))?;
        log::debug!("Initialized hash store at {}", self.path.display());
        Ok(())
    }

    /// Check whether a record exists for `path`.
    pub fn contains(&self, path: &str) -> StoreResult<bool> {
        let conn = self.connect()?;
        let found = conn
            .query_row(EXISTS_SQL, params![path], |_| Ok(()))
            .optional()
            .map_err(|e| self.sqlite_error(e))?;
        Ok(found.is_some())
    }

    /// Return every stored record.
    ///
    /// Records come back ordered by path, but callers should treat the
    /// result as an unordered set.
    pub fn list_all(&self) -> StoreResult<Vec<HashRecord>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(LIST_SQL).map_err(|e| self.sqlite_error(e))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(HashRecord {
                    path: row.get(0)?,
                    hash: row.get(1)?,
                })
            })
            .map_err(|e| self.sqlite_error(e))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| self.sqlite_error(e))
    }

    /// Insert a new record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicatePath`] if the path is already stored.
    /// Existing records are never overwritten.
    pub fn insert(&self, record: &HashRecord) -> StoreResult<()> {
        let conn = self.connect()?;
        match conn.execute(INSERT_SQL, params![record.path, record.hash]) {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::DuplicatePath(record.path.clone()))
            }
            Err(e) => Err(self.sqlite_error(e)),
        }
    }

    /// Number of stored records.
    pub fn count(&self) -> StoreResult<usize> {
        let conn = self.connect()?;
        let count: i64 = conn
            .query_row(COUNT_SQL, [], |row| row.get(0))
            .map_err(|e| self.sqlite_error(e))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Open an existing store without creating it.
    fn connect(&self) -> StoreResult<Connection> {
        if !self.exists_on_disk() {
            return Err(StoreError::Missing(self.path.clone()));
        }
        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| self.sqlite_error(e))
    }

    fn sqlite_error(&self, source: rusqlite::Error) -> StoreError {
        log::error!("SQLite error in {}: {}", self.path.display(), source);
        StoreError::Sqlite {
            path: self.path.clone(),
            source,
        }
    }
}
