//! Integration tests for tree structure correctness

use std::fs;
use tempfile::TempDir;
use verse::store::{MemoryObjectStore, ObjectStore};
use verse::tree::builder::TreeBuilder;
use verse::tree::hasher;
use verse::tree::walker::WalkerConfig;

/// Entries follow file-name order, whatever the creation order
#[test]
fn test_entries_sorted_by_name() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    for name in ["zeta.txt", "alpha.txt", "Mid.txt", "beta"] {
        if name == "beta" {
            fs::create_dir(root.join(name)).unwrap();
        } else {
            fs::write(root.join(name), name).unwrap();
        }
    }

    let store = MemoryObjectStore::new();
    let built = TreeBuilder::new(root.to_path_buf(), &store).build().unwrap();
    let names: Vec<&str> = built.root.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Mid.txt", "alpha.txt", "beta", "zeta.txt"]);
}

/// Files become blobs, directories become trees
#[test]
fn test_entry_kinds() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("file.txt"), "content").unwrap();
    fs::create_dir(root.join("dir")).unwrap();
    fs::write(root.join("dir").join("inner.txt"), "inner").unwrap();

    let store = MemoryObjectStore::new();
    let built = TreeBuilder::new(root.to_path_buf(), &store).build().unwrap();

    let file = built.root.find("file.txt").unwrap();
    assert!(file.is_blob);
    assert_eq!(file.hash, hasher::hash_blob(b"content"));

    let dir = built.root.find("dir").unwrap();
    assert!(!dir.is_blob);
    let child = store.get_tree(&dir.hash).unwrap();
    assert_eq!(child.len(), 1);
    assert_eq!(child.entries[0].name, "inner.txt");
}

/// An empty directory is an empty tree
#[test]
fn test_empty_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("empty")).unwrap();

    let store = MemoryObjectStore::new();
    let built = TreeBuilder::new(temp_dir.path().to_path_buf(), &store)
        .build()
        .unwrap();
    let entry = built.root.find("empty").unwrap();
    assert!(store.get_tree(&entry.hash).unwrap().is_empty());
}

/// The metadata directory is never part of a snapshot
#[test]
fn test_metadata_dir_excluded() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join(".verse").join("objects")).unwrap();
    fs::write(temp_dir.path().join("kept.txt"), "kept").unwrap();

    let store = MemoryObjectStore::new();
    let built = TreeBuilder::new(temp_dir.path().to_path_buf(), &store)
        .build()
        .unwrap();
    assert_eq!(built.root.len(), 1);
    assert!(built.root.find(".verse").is_none());
}

/// Nesting beyond the configured depth fails the build
#[test]
fn test_depth_limit() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("a").join("b").join("c")).unwrap();

    let store = MemoryObjectStore::new();
    let result = TreeBuilder::new(temp_dir.path().to_path_buf(), &store)
        .with_walker_config(WalkerConfig {
            max_depth: 2,
            ..WalkerConfig::default()
        })
        .build();
    assert!(result.is_err());
}

/// Same content in the same shape gives the same root, wherever it lives
#[test]
fn test_build_deterministic_across_locations() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    for dir in [&first, &second] {
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src").join("lib.txt"), "lib").unwrap();
        fs::write(dir.path().join("notes.txt"), "notes").unwrap();
    }

    let store = MemoryObjectStore::new();
    let a = TreeBuilder::new(first.path().to_path_buf(), &store).build().unwrap();
    let b = TreeBuilder::new(second.path().to_path_buf(), &store).build().unwrap();
    assert_eq!(a.root_id(), b.root_id());
}
