//! Property-based tests for determinism guarantees

use proptest::prelude::*;
use verse::tree::codec;
use verse::tree::hasher;
use verse::tree::node::{Tree, TreeEntry};
use verse::ObjectId;

fn entry_strategy() -> impl Strategy<Value = TreeEntry> {
    (
        "[a-zA-Z0-9_.-]{1,16}",
        prop_oneof![Just("100644"), Just("100755"), Just("40755")],
        any::<[u8; 32]>(),
        any::<bool>(),
    )
        .prop_map(|(name, mode, hash, is_blob)| {
            TreeEntry::new(name, mode, ObjectId::from_bytes(hash), is_blob)
        })
}

proptest! {
    /// Same content always gives the same blob address
    #[test]
    fn test_blob_hash_determinism(content in any::<Vec<u8>>(), other in any::<Vec<u8>>()) {
        prop_assert_eq!(hasher::hash_blob(&content), hasher::hash_blob(&content.clone()));
        if content != other {
            prop_assert_ne!(hasher::hash_blob(&content), hasher::hash_blob(&other));
        }
    }

    /// Decoding an encoded tree gives back every entry field
    #[test]
    fn test_codec_round_trip(entries in prop::collection::vec(entry_strategy(), 0..12)) {
        let tree = Tree::with_entries(entries);
        let decoded = codec::decode(&codec::encode(&tree).unwrap()).unwrap();
        prop_assert_eq!(decoded, tree);
    }

    /// Names and modes do not affect the tree address
    #[test]
    fn test_tree_hash_ignores_names_and_modes(
        entries in prop::collection::vec(entry_strategy(), 0..12),
        suffix in "[a-z]{1,4}",
    ) {
        let renamed: Vec<TreeEntry> = entries
            .iter()
            .map(|e| TreeEntry::new(format!("{}{}", e.name, suffix), "100600", e.hash, e.is_blob))
            .collect();
        prop_assert_eq!(hasher::hash_tree(&entries), hasher::hash_tree(&renamed));
    }

    /// Hex ids parse back to themselves
    #[test]
    fn test_object_id_hex_round_trip(bytes in any::<[u8; 32]>()) {
        let id = ObjectId::from_bytes(bytes);
        prop_assert_eq!(id.to_hex().parse::<ObjectId>().unwrap(), id);
    }
}
