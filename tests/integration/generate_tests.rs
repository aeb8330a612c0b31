//! Integration tests for generate mode.

use std::fs;

use hashmyfiles::config::Config;
use hashmyfiles::integrity::{generate, IntegrityConfig, IntegrityError};
use hashmyfiles::store::HashStore;
use tempfile::TempDir;

const HASH_X: &str = "4b68ab3847feda7d6c62c1fbcbeebfa35eab7351ed5e78f4ddadea5df64b8015";

fn store_for(dir: &TempDir) -> HashStore {
    let root = dir.path().canonicalize().unwrap();
    HashStore::in_directory(&root, "hashmyfiles.db")
}

#[test]
fn test_media_file_hashed_and_text_ignored() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.mp4"), b"X").unwrap();
    fs::write(dir.path().join("b.txt"), b"notes").unwrap();

    let summary = generate(dir.path(), &IntegrityConfig::default()).unwrap();

    assert!(summary.store_created);
    assert_eq!(summary.hashed, 1);

    let records = store_for(&dir).list_all().unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].path.ends_with("a.mp4"));
    assert_eq!(records[0].hash, HASH_X);
}

#[test]
fn test_second_run_hashes_nothing() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.mp4"), b"X").unwrap();
    fs::write(dir.path().join("c.mkv"), b"Y").unwrap();

    let first = generate(dir.path(), &IntegrityConfig::default()).unwrap();
    let before = store_for(&dir).list_all().unwrap();

    let second = generate(dir.path(), &IntegrityConfig::default()).unwrap();
    let after = store_for(&dir).list_all().unwrap();

    assert_eq!(first.hashed, 2);
    assert!(!second.store_created);
    assert_eq!(second.hashed, 0);
    assert_eq!(second.already_stored, 2);
    assert_eq!(before, after);
}

#[test]
fn test_existing_records_are_not_rehashed() {
    let dir = TempDir::new().unwrap();
    let clip = dir.path().join("a.mp4");
    fs::write(&clip, b"X").unwrap();
    generate(dir.path(), &IntegrityConfig::default()).unwrap();

    fs::write(&clip, b"changed").unwrap();
    fs::write(dir.path().join("new.mkv"), b"Y").unwrap();
    let summary = generate(dir.path(), &IntegrityConfig::default()).unwrap();

    assert_eq!(summary.hashed, 1);
    let store = store_for(&dir);
    assert_eq!(store.count().unwrap(), 2);
    let old = store
        .list_all()
        .unwrap()
        .into_iter()
        .find(|r| r.path.ends_with("a.mp4"))
        .unwrap();
    assert_eq!(old.hash, HASH_X);
}

#[test]
fn test_nested_directories_are_walked() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("shows/season1")).unwrap();
    fs::write(dir.path().join("shows/season1/ep1.mkv"), b"1").unwrap();
    fs::write(dir.path().join("shows/ep0.mp4"), b"0").unwrap();

    let summary = generate(dir.path(), &IntegrityConfig::default()).unwrap();

    assert_eq!(summary.hashed, 2);
    let root = dir.path().canonicalize().unwrap();
    let paths: Vec<String> = store_for(&dir)
        .list_all()
        .unwrap()
        .into_iter()
        .map(|r| r.path)
        .collect();
    assert!(paths
        .iter()
        .any(|p| p == &root.join("shows/season1/ep1.mkv").to_string_lossy()));
}

#[test]
fn test_avi_not_considered() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("video.avi"), b"avi").unwrap();
    fs::write(dir.path().join("clip.mkv"), b"mkv").unwrap();
    fs::write(dir.path().join("loud.MP4"), b"upper").unwrap();

    generate(dir.path(), &IntegrityConfig::default()).unwrap();

    let records = store_for(&dir).list_all().unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].path.ends_with("clip.mkv"));
}

#[test]
fn test_custom_extensions() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("video.avi"), b"avi").unwrap();
    fs::write(dir.path().join("clip.mkv"), b"mkv").unwrap();

    let config = Config::default().with_extensions(vec![".avi".to_string()]);
    let summary = generate(dir.path(), &IntegrityConfig::new(config)).unwrap();

    assert_eq!(summary.hashed, 1);
    let records = store_for(&dir).list_all().unwrap();
    assert!(records[0].path.ends_with("video.avi"));
}

#[test]
fn test_empty_directory_creates_empty_store() {
    let dir = TempDir::new().unwrap();

    let summary = generate(dir.path(), &IntegrityConfig::default()).unwrap();

    assert_eq!(summary.candidates, 0);
    assert!(dir.path().join("hashmyfiles.db").is_file());
    assert_eq!(store_for(&dir).count().unwrap(), 0);
}

#[test]
fn test_missing_directory_leaves_no_store() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");

    let result = generate(&missing, &IntegrityConfig::default());

    assert!(matches!(result, Err(IntegrityError::PathNotFound(_))));
    assert!(!missing.exists());
    assert!(!dir.path().join("hashmyfiles.db").exists());
}

#[cfg(unix)]
#[test]
fn test_symlinked_media_file_is_hashed() {
    let library = TempDir::new().unwrap();
    let outside = TempDir::new().unwrap();
    let target = outside.path().join("movie.mkv");
    fs::write(library.path().join("a.mp4"), b"X").unwrap();
    fs::write(&target, b"X").unwrap();
    std::os::unix::fs::symlink(&target, library.path().join("movie.mkv")).unwrap();

    let summary = generate(library.path(), &IntegrityConfig::default()).unwrap();

    assert_eq!(summary.candidates, 2);
    assert_eq!(summary.hashed, 2);
    let records = store_for(&library).list_all().unwrap();
    assert!(records
        .iter()
        .any(|r| r.path.ends_with("movie.mkv") && r.hash == HASH_X));
}
