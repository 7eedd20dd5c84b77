//! Integration tests for snapshot determinism

use super::test_utils::{site, write_file};
use coderman::snapshot::builder::{build_snapshot, SnapshotBuilder};
use coderman::snapshot::hasher;
use coderman::snapshot::walker::scan_files;
use std::collections::BTreeSet;

/// Same files written in a different order produce the same master hash
#[test]
fn test_creation_order_does_not_matter() {
    let first = site(&[("a.html", "A"), ("css/b.css", "B"), ("z.html", "Z")]);
    let second = site(&[("z.html", "Z"), ("css/b.css", "B"), ("a.html", "A")]);

    let s1 = SnapshotBuilder::new(first.path().to_path_buf())
        .build()
        .unwrap();
    let s2 = SnapshotBuilder::new(second.path().to_path_buf())
        .build()
        .unwrap();
    assert_eq!(s1.master_hash, s2.master_hash);
    assert_eq!(s1, s2);
}

#[test]
fn test_scan_is_sorted_and_relative() {
    let dir = site(&[("b.css", "b"), ("a/index.html", "a"), ("a.html", "x")]);
    let paths: Vec<String> = scan_files(dir.path()).unwrap().into_iter().collect();
    assert_eq!(paths, vec!["a.html", "a/index.html", "b.css"]);
}

#[test]
fn test_master_hash_is_hash_of_concatenated_file_hashes() {
    let dir = site(&[("b.css", "b"), ("a.html", "a")]);
    let snapshot = SnapshotBuilder::new(dir.path().to_path_buf())
        .build()
        .unwrap();

    let concatenated = format!(
        "{}{}",
        snapshot.get("a.html").unwrap(),
        snapshot.get("b.css").unwrap()
    );
    assert_eq!(
        snapshot.master_hash,
        hex::encode(hasher::compute_content_hash(concatenated.as_bytes()))
    );
}

#[test]
fn test_empty_set_hashes_empty_string() {
    let dir = site(&[]);
    let snapshot = build_snapshot(dir.path(), &BTreeSet::new()).unwrap();
    assert_eq!(
        snapshot.master_hash,
        hex::encode(hasher::compute_content_hash(b""))
    );
}

#[test]
fn test_content_change_changes_master_hash() {
    let dir = site(&[("index.html", "one")]);
    let builder = SnapshotBuilder::new(dir.path().to_path_buf());
    let before = builder.build().unwrap();
    write_file(dir.path(), "index.html", "two");
    let after = builder.build().unwrap();
    assert_ne!(before.master_hash, after.master_hash);
}

#[test]
fn test_file_hash_is_lowercase_hex_blake3() {
    let dir = site(&[("index.html", "hello")]);
    let hash = hasher::hash_file(&dir.path().join("index.html")).unwrap();
    assert_eq!(hash.len(), 64);
    assert_eq!(hash, blake3::hash(b"hello").to_hex().to_string());
}
