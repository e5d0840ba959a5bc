//! Integration tests for manifest mode

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use treesum::{build_manifest, Algorithm, CryptoAlgorithm};

const SHA256_HI: &str = "8f434346648f6b96df89dda901c5176b10a6d83961dd3c1ac88b59b2dc327aa4";

fn write_tree(root: &Path) {
    fs::create_dir_all(root.join("dir").join("nested")).unwrap();
    fs::write(root.join("dir").join("a.txt"), "hi").unwrap();
    fs::write(root.join("dir").join("._cache"), "junk").unwrap();
    fs::write(root.join("dir").join("nested").join("b.txt"), "hello world").unwrap();
    fs::write(root.join("dir").join("nested").join("mod.pyc"), "bytecode").unwrap();
    fs::write(root.join("._resource"), "apple metadata").unwrap();
    fs::write(root.join("top.py"), "print('hi')").unwrap();
}

/// Test the documented scenario: one entry, content-only digest
#[test]
fn test_manifest_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir(root.join("dir")).unwrap();
    fs::write(root.join("dir").join("a.txt"), "hi").unwrap();
    fs::write(root.join("dir").join("._cache"), "junk").unwrap();

    let manifest = build_manifest(root, CryptoAlgorithm::Sha256.into()).unwrap();
    assert_eq!(manifest.len(), 1);
    assert_eq!(manifest.get("dir/a.txt"), Some(SHA256_HI));
}

/// Test that excluded files never appear, at any depth
#[test]
fn test_manifest_exclusions() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path());

    let manifest = build_manifest(temp_dir.path(), Algorithm::Crc32).unwrap();
    let paths: Vec<_> = manifest.paths().collect();
    assert_eq!(paths, vec!["dir/a.txt", "dir/nested/b.txt", "top.py"]);
}

/// Test that checksum digests are 8 char unsigned hex
#[test]
fn test_checksum_manifest_format() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path());

    let manifest = build_manifest(temp_dir.path(), Algorithm::Crc32).unwrap();
    assert_eq!(manifest.get("dir/a.txt"), Some("d8932aac"));
    assert_eq!(manifest.get("dir/nested/b.txt"), Some("0d4a1185"));
    for (_, digest) in manifest.iter() {
        assert_eq!(digest.len(), 8);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}

/// Test that cryptographic digests are 64 char lowercase hex
#[test]
fn test_crypto_manifest_format() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path());

    for algorithm in [CryptoAlgorithm::Sha256, CryptoAlgorithm::Blake3] {
        let manifest = build_manifest(temp_dir.path(), algorithm.into()).unwrap();
        assert_eq!(manifest.len(), 3);
        for (_, digest) in manifest.iter() {
            assert_eq!(digest.len(), 64);
            assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }
}

/// Test that the same relative content at another location gives the same manifest
#[test]
fn test_manifest_path_independence() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let first_root = first.path().join("a").join("b");
    let second_root = second.path().join("x").join("y").join("b");
    write_tree(&first_root);
    write_tree(&second_root);

    let m1 = build_manifest(&first_root, CryptoAlgorithm::Sha256.into()).unwrap();
    let m2 = build_manifest(&second_root, CryptoAlgorithm::Sha256.into()).unwrap();
    assert_eq!(m1, m2);
}

/// Test that empty directories are not represented in a manifest
#[test]
fn test_manifest_ignores_empty_directories() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path());
    let before = build_manifest(temp_dir.path(), Algorithm::Crc32).unwrap();

    fs::create_dir(temp_dir.path().join("empty")).unwrap();
    let after = build_manifest(temp_dir.path(), Algorithm::Crc32).unwrap();

    assert_eq!(before, after);
}

/// Test that a single file root yields one entry under the empty path
#[test]
fn test_manifest_single_file() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("archive.tar");
    fs::write(&file, "hi").unwrap();

    let manifest = build_manifest(&file, CryptoAlgorithm::Sha256.into()).unwrap();
    let entries: Vec<_> = manifest.iter().collect();
    assert_eq!(entries, vec![("", SHA256_HI)]);
}

/// Test that manifests serialize to an ordered JSON object
#[test]
fn test_manifest_json_output() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path());

    let manifest = build_manifest(temp_dir.path(), Algorithm::Crc32).unwrap();
    let json = treesum::cli::format_manifest_json(&manifest).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["dir/a.txt"], "d8932aac");
    assert!(json.find("dir/a.txt").unwrap() < json.find("top.py").unwrap());
}
