//! Integration tests for init, status and flush on a real directory

use super::test_utils::{object_count, sample_project, write_file};
use std::fs;
use tempfile::TempDir;
use verse::store::ObjectStore;
use verse::tree::hasher;
use verse::tree::walker::Walker;
use verse::{Repository, StorageError};

#[test]
fn test_sample_project_snapshot() {
    let project = sample_project();
    let repo = Repository::open(project.path());
    let report = repo.init().unwrap();

    // hello, code, src tree, root tree
    assert_eq!(object_count(project.path()), 4);
    assert_eq!(
        fs::read_to_string(repo.layout().head_file()).unwrap(),
        report.head.to_hex()
    );

    let status = repo.status().unwrap();
    assert_eq!(status.head, report.head);
    let names: Vec<&str> = status.tree.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["readme.txt", "src"]);

    let store = repo.store();
    assert!(store.contains(&hasher::hash_blob(b"hello")).unwrap());
    assert!(store.contains(&hasher::hash_blob(b"code")).unwrap());
}

#[test]
fn test_identical_files_share_one_object() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "a", "X");
    write_file(temp_dir.path(), "b", "X");

    let repo = Repository::open(temp_dir.path());
    let report = repo.init().unwrap();

    let status = repo.status().unwrap();
    assert_eq!(status.tree.entries[0].hash, status.tree.entries[1].hash);
    // blob "X" and the root tree
    assert_eq!(object_count(temp_dir.path()), 2);
    assert_eq!(report.stats.blobs, 2);
}

#[test]
fn test_head_equals_live_hash() {
    let project = sample_project();
    let repo = Repository::open(project.path());
    let report = repo.init().unwrap();

    assert_eq!(
        hasher::hash_directory(project.path(), &Walker::new()).unwrap(),
        report.head
    );
}

#[test]
fn test_reinit_is_stable_and_moves_head() {
    let project = sample_project();
    let repo = Repository::open(project.path());
    let first = repo.init().unwrap().head;
    assert_eq!(repo.init().unwrap().head, first);
    assert_eq!(object_count(project.path()), 4);

    write_file(project.path(), "readme.txt", "hello again");
    let second = repo.init().unwrap().head;
    assert_ne!(first, second);
    assert_eq!(repo.head().get().unwrap(), second);
    // old objects are kept
    assert!(repo.store().contains(&first).unwrap());
}

#[test]
fn test_empty_workspace() {
    let temp_dir = TempDir::new().unwrap();
    let repo = Repository::open(temp_dir.path());
    let report = repo.init().unwrap();

    assert_eq!(report.entries, 0);
    assert!(repo.status().unwrap().tree.is_empty());
}

#[test]
fn test_status_before_init() {
    let temp_dir = TempDir::new().unwrap();
    let repo = Repository::open(temp_dir.path());
    assert!(matches!(repo.status(), Err(StorageError::HeadNotFound(_))));
}

#[test]
fn test_flush_then_status_fails() {
    let project = sample_project();
    let repo = Repository::open(project.path());
    repo.init().unwrap();
    repo.flush().unwrap();

    assert!(!project.path().join(".verse").exists());
    assert!(project.path().join("readme.txt").exists());
    assert!(repo.status().unwrap_err().is_not_found());
}
