//! Integration tests for the on-disk object store

use std::fs;
use tempfile::TempDir;
use verse::store::{FsObjectStore, ObjectStore};
use verse::tree::codec;
use verse::tree::hasher;
use verse::tree::node::{Blob, Tree, TreeEntry};
use verse::StorageError;

fn store() -> (TempDir, FsObjectStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = FsObjectStore::new(temp_dir.path().join("objects"));
    (temp_dir, store)
}

#[test]
fn test_object_file_named_by_hex_hash() {
    let (_dir, store) = store();
    let id = store.put_blob(&Blob::new(b"hello".to_vec())).unwrap();

    let path = store.object_path(&id);
    assert_eq!(path.file_name().unwrap().to_string_lossy(), id.to_hex());
    assert_eq!(fs::read(&path).unwrap(), b"hello");
}

#[test]
fn test_duplicate_put_writes_once() {
    let (_dir, store) = store();
    let first = store.put_blob(&Blob::new(b"X".to_vec())).unwrap();
    let second = store.put_blob(&Blob::new(b"X".to_vec())).unwrap();

    assert_eq!(first, second);
    assert_eq!(store.list().unwrap(), vec![first]);
}

#[test]
fn test_tree_bytes_are_codec_output() {
    let (_dir, store) = store();
    let tree = Tree::with_entries(vec![TreeEntry::new(
        "a.txt",
        "100644",
        hasher::hash_blob(b"a"),
        true,
    )]);
    let id = store.put_tree(&tree).unwrap();

    assert_eq!(id, hasher::hash_tree(&tree.entries));
    assert_eq!(store.get(&id).unwrap(), codec::encode(&tree).unwrap());
    assert_eq!(store.get_tree(&id).unwrap(), tree);
}

#[test]
fn test_missing_object() {
    let (_dir, store) = store();
    let id = hasher::hash_blob(b"never stored");
    assert!(!store.contains(&id).unwrap());
    assert!(matches!(
        store.get_blob(&id),
        Err(StorageError::ObjectNotFound(missing)) if missing == id
    ));
}

#[test]
fn test_reopened_store_sees_objects() {
    let (dir, store) = store();
    let id = store.put_blob(&Blob::new(b"persisted".to_vec())).unwrap();
    drop(store);

    let reopened = FsObjectStore::new(dir.path().join("objects"));
    assert_eq!(reopened.get_blob(&id).unwrap().content, b"persisted");
}
