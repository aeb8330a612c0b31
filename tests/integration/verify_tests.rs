//! Integration tests for verify mode.

use std::fs;

use hashmyfiles::integrity::{generate, verify, Corruption, IntegrityConfig, IntegrityError};
use hashmyfiles::output::text;
use hashmyfiles::store::{HashRecord, HashStore};
use tempfile::TempDir;

const HASH_X: &str = "4b68ab3847feda7d6c62c1fbcbeebfa35eab7351ed5e78f4ddadea5df64b8015";
const HASH_XY: &str = "c07a3de039fbc0914689549f041eae295d621de7f7f647fd863f6d2f8db2080e";

#[test]
fn test_generate_then_verify_is_clean() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.mp4"), b"X").unwrap();
    fs::write(dir.path().join("b.mkv"), b"Y").unwrap();
    generate(dir.path(), &IntegrityConfig::default()).unwrap();

    let report = verify(dir.path(), &IntegrityConfig::default()).unwrap();

    assert!(report.is_clean());
    assert_eq!(report.checked, 2);
    assert_eq!(report.ok, 2);
}

#[test]
fn test_modified_file_reported() {
    let dir = TempDir::new().unwrap();
    let clip = dir.path().join("a.mp4");
    fs::write(&clip, b"X").unwrap();
    generate(dir.path(), &IntegrityConfig::default()).unwrap();

    fs::write(&clip, b"XY").unwrap();
    let report = verify(dir.path(), &IntegrityConfig::default()).unwrap();

    assert_eq!(report.corrupted.len(), 1);
    let corrupted = &report.corrupted[0];
    assert!(corrupted.path.ends_with("a.mp4"));
    assert_eq!(corrupted.expected, HASH_X);
    assert_eq!(corrupted.actual(), Some(HASH_XY));
}

#[test]
fn test_deleted_file_reported_missing() {
    let dir = TempDir::new().unwrap();
    let clip = dir.path().join("a.mp4");
    fs::write(&clip, b"X").unwrap();
    fs::write(dir.path().join("b.mkv"), b"Y").unwrap();
    generate(dir.path(), &IntegrityConfig::default()).unwrap();

    fs::remove_file(&clip).unwrap();
    let report = verify(dir.path(), &IntegrityConfig::default()).unwrap();

    assert_eq!(report.checked, 2);
    assert_eq!(report.ok, 1);
    assert_eq!(report.corrupted.len(), 1);
    assert_eq!(report.corrupted[0].corruption, Corruption::Missing);
    assert_eq!(report.corrupted[0].actual(), None);
}

#[test]
fn test_unrecorded_files_are_ignored() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.mp4"), b"X").unwrap();
    generate(dir.path(), &IntegrityConfig::default()).unwrap();

    fs::write(dir.path().join("late.mkv"), b"late").unwrap();
    let report = verify(dir.path(), &IntegrityConfig::default()).unwrap();

    assert!(report.is_clean());
    assert_eq!(report.checked, 1);
}

#[test]
fn test_verify_without_store_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.mp4"), b"X").unwrap();

    let result = verify(dir.path(), &IntegrityConfig::default());

    assert!(matches!(result, Err(IntegrityError::StoreMissing(_))));
    assert!(!dir.path().join("hashmyfiles.db").exists());
}

#[test]
fn test_verify_empty_store() {
    let dir = TempDir::new().unwrap();
    generate(dir.path(), &IntegrityConfig::default()).unwrap();

    let report = verify(dir.path(), &IntegrityConfig::default()).unwrap();

    assert!(report.is_clean());
    assert_eq!(report.checked, 0);
}

#[test]
fn test_verify_does_not_modify_store() {
    let dir = TempDir::new().unwrap();
    let clip = dir.path().join("a.mp4");
    fs::write(&clip, b"X").unwrap();
    generate(dir.path(), &IntegrityConfig::default()).unwrap();
    fs::write(&clip, b"XY").unwrap();

    let root = dir.path().canonicalize().unwrap();
    let store = HashStore::in_directory(&root, "hashmyfiles.db");
    let before = store.list_all().unwrap();
    verify(dir.path(), &IntegrityConfig::default()).unwrap();

    assert_eq!(store.list_all().unwrap(), before);
}

#[test]
fn test_records_inserted_directly_are_verified() {
    let dir = TempDir::new().unwrap();
    let clip = dir.path().join("a.mp4");
    fs::write(&clip, b"X").unwrap();

    let store = HashStore::in_directory(dir.path(), "hashmyfiles.db");
    store.initialize().unwrap();
    store
        .insert(&HashRecord::new(clip.to_string_lossy(), HASH_X))
        .unwrap();

    let report = verify(dir.path(), &IntegrityConfig::default()).unwrap();
    assert!(report.is_clean());
}

#[test]
fn test_text_report_lists_corruption() {
    let dir = TempDir::new().unwrap();
    let clip = dir.path().join("a.mp4");
    fs::write(&clip, b"X").unwrap();
    generate(dir.path(), &IntegrityConfig::default()).unwrap();
    fs::write(&clip, b"XY").unwrap();

    let report = verify(dir.path(), &IntegrityConfig::default()).unwrap();
    let mut buf = Vec::new();
    text::write_verify_report(&mut buf, &report).unwrap();
    let rendered = String::from_utf8(buf).unwrap();

    assert!(rendered.contains("1 corrupted files:"));
    assert!(rendered.contains(&format!("Expected hash: {}", HASH_X)));
    assert!(rendered.contains(&format!("File hash: {}", HASH_XY)));
}

#[cfg(unix)]
#[test]
fn test_symlink_target_change_detected() {
    let library = TempDir::new().unwrap();
    let outside = TempDir::new().unwrap();
    let target = outside.path().join("movie.mkv");
    fs::write(&target, b"X").unwrap();
    std::os::unix::fs::symlink(&target, library.path().join("movie.mkv")).unwrap();
    generate(library.path(), &IntegrityConfig::default()).unwrap();

    fs::write(&target, b"XY").unwrap();
    let report = verify(library.path(), &IntegrityConfig::default()).unwrap();

    assert_eq!(report.corrupted.len(), 1);
    assert_eq!(report.corrupted[0].actual(), Some(HASH_XY));
}
