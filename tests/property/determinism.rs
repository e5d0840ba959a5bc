//! Property-based tests for determinism guarantees

use super::test_utils::{ListingOrder, MemoryFs};
use proptest::prelude::*;
use treesum::digest::checksum_hex;
use treesum::tree::{Fingerprint, Fingerprinter, HashStrategy, Walker};
use treesum::CryptoAlgorithm;

const STRATEGIES: [HashStrategy; 3] = [
    HashStrategy::Aggregate(CryptoAlgorithm::Sha256),
    HashStrategy::ManifestCrypto(CryptoAlgorithm::Sha256),
    HashStrategy::ManifestChecksum,
];

/// Relative paths built from a small alphabet so that siblings and
/// prefix-sharing names ("a", "a.b", "ab") show up often. Segments never
/// start with a dot.
fn relative_path() -> impl Strategy<Value = String> {
    prop::collection::vec("[aAb_][aAb._]{0,2}", 1..4).prop_map(|segments| segments.join("/"))
}

fn tree_entries() -> impl Strategy<Value = Vec<(String, Vec<u8>)>> {
    prop::collection::vec((relative_path(), any::<Vec<u8>>()), 0..12)
}

/// Build a filesystem, keeping only entries that do not collide with an
/// already added file or directory.
fn build_fs(entries: &[(String, Vec<u8>)], order: ListingOrder) -> MemoryFs {
    let mut memfs = MemoryFs::new().with_order(order);
    let mut files: Vec<&str> = Vec::new();
    let mut dirs: Vec<String> = Vec::new();

    for (path, content) in entries {
        let segments: Vec<&str> = path.split('/').collect();
        let parents: Vec<String> = (1..segments.len())
            .map(|n| segments[..n].join("/"))
            .collect();
        let collides = files.contains(&path.as_str())
            || dirs.contains(path)
            || parents.iter().any(|p| files.contains(&p.as_str()));
        if collides {
            continue;
        }
        memfs.add_file(path, content);
        files.push(path.as_str());
        dirs.extend(parents);
    }
    memfs
}

fn fingerprint(memfs: MemoryFs, strategy: HashStrategy) -> Fingerprint {
    Fingerprinter::from_walker(Walker::with_fs(MemoryFs::root(), memfs))
        .fingerprint(strategy)
        .unwrap()
}

/// Test that results never depend on the order entries are listed in
#[test]
fn test_listing_order_independence_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(tree_entries(), any::<u64>()), |(entries, seed)| {
            for strategy in STRATEGIES {
                let sorted = fingerprint(build_fs(&entries, ListingOrder::Sorted), strategy);
                let reversed = fingerprint(build_fs(&entries, ListingOrder::Reversed), strategy);
                let permuted =
                    fingerprint(build_fs(&entries, ListingOrder::Permuted(seed)), strategy);

                prop_assert_eq!(&sorted, &reversed);
                prop_assert_eq!(&sorted, &permuted);
            }
            Ok(())
        })
        .unwrap();
}

/// Test that walk output is identical across repeated runs
#[test]
fn test_repeated_walk_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&tree_entries(), |entries| {
            let walker = Walker::with_fs(MemoryFs::root(), build_fs(&entries, ListingOrder::Sorted));
            let first: Vec<_> = walker
                .walk()
                .unwrap()
                .into_iter()
                .map(|node| node.relative_path)
                .collect();
            let second: Vec<_> = walker
                .walk()
                .unwrap()
                .into_iter()
                .map(|node| node.relative_path)
                .collect();

            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.first().map(String::as_str), Some(""));
            Ok(())
        })
        .unwrap();
}

/// Test that AppleDouble and .pyc files never change any result
#[test]
fn test_excluded_files_have_no_effect_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(tree_entries(), "[a-z]{1,4}", any::<Vec<u8>>()),
            |(entries, stem, junk)| {
                let baseline = build_fs(&entries, ListingOrder::Sorted);

                let mut noisy = baseline.clone();
                noisy
                    .add_file(&format!("._{}", stem), &junk)
                    .add_file(&format!("{}.pyc", stem), &junk)
                    .add_file(&format!("zz_{}/._{}", stem, stem), &junk);

                // zz_<stem> is a new directory, which aggregate mode sees.
                // Manifests only see files, so they must be unchanged.
                for strategy in [
                    HashStrategy::ManifestCrypto(CryptoAlgorithm::Sha256),
                    HashStrategy::ManifestChecksum,
                ] {
                    prop_assert_eq!(
                        fingerprint(baseline.clone(), strategy),
                        fingerprint(noisy.clone(), strategy)
                    );
                }
                Ok(())
            },
        )
        .unwrap();
}

/// Test that checksum hex is always 8 chars of the unsigned value
#[test]
fn test_checksum_hex_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&any::<i32>(), |raw| {
            let hex = checksum_hex(raw);
            prop_assert_eq!(hex.len(), 8);
            prop_assert_eq!(u32::from_str_radix(&hex, 16).unwrap(), raw as u32);
            prop_assert!(!hex.starts_with('-'));
            Ok(())
        })
        .unwrap();
}
