//! Integration tests for the on-disk hash store.

use std::fs;

use hashmyfiles::store::{HashRecord, HashStore, StoreError};
use rusqlite::Connection;
use tempfile::TempDir;

#[test]
fn test_store_schema_readable_by_sqlite() {
    let dir = TempDir::new().unwrap();
    let store = HashStore::in_directory(dir.path(), "hashmyfiles.db");
    store.initialize().unwrap();
    store.insert(&HashRecord::new("/m/a.mp4", "aa")).unwrap();

    let conn = Connection::open(store.path()).unwrap();
    let (path, hash): (String, String) = conn
        .query_row("SELECT path, hash FROM hashes", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .unwrap();

    assert_eq!(path, "/m/a.mp4");
    assert_eq!(hash, "aa");
}

#[test]
fn test_store_reads_externally_written_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hashmyfiles.db");
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE hashes (path TEXT PRIMARY KEY, hash TEXT);
             INSERT INTO hashes VALUES ('/m/b.mkv', 'bb');
             INSERT INTO hashes VALUES ('/m/a.mp4', 'aa');",
        )
        .unwrap();
    }

    let store = HashStore::new(&path);
    store.initialize().unwrap();

    assert!(store.contains("/m/a.mp4").unwrap());
    assert_eq!(
        store.list_all().unwrap(),
        vec![
            HashRecord::new("/m/a.mp4", "aa"),
            HashRecord::new("/m/b.mkv", "bb")
        ]
    );
}

#[test]
fn test_duplicate_insert_keeps_first_hash() {
    let dir = TempDir::new().unwrap();
    let store = HashStore::in_directory(dir.path(), "hashmyfiles.db");
    store.initialize().unwrap();
    store.insert(&HashRecord::new("/m/a.mp4", "aa")).unwrap();

    let result = store.insert(&HashRecord::new("/m/a.mp4", "zz"));

    assert!(matches!(result, Err(StoreError::DuplicatePath(_))));
    assert_eq!(store.list_all().unwrap()[0].hash, "aa");
}

#[test]
fn test_garbage_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hashmyfiles.db");
    fs::write(&path, vec![b'x'; 4096]).unwrap();

    let store = HashStore::new(&path);

    assert!(matches!(store.list_all(), Err(StoreError::Sqlite { .. })));
}

#[test]
fn test_queries_on_absent_store() {
    let dir = TempDir::new().unwrap();
    let store = HashStore::in_directory(dir.path(), "hashmyfiles.db");

    assert!(matches!(store.contains("/m/a.mp4"), Err(StoreError::Missing(_))));
    assert!(!store.exists_on_disk());
}
