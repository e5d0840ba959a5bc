//! Deterministic filesystem traversal and hashing
//!
//! Walks a subtree in a fixed order, yielding directories and regular files
//! with paths relative to the chosen root, and folds them into either one
//! aggregate digest or a per-file manifest.

pub mod builder;
pub mod exclude;
pub mod fs;
pub mod hasher;
pub mod path;
pub mod walker;

pub use builder::{Fingerprint, Fingerprinter, HashStrategy, Mode};
pub use exclude::{ExclusionRule, Exclusions};
pub use fs::{EntryKind, FileSystem, LocalFs};
pub use hasher::{AggregateAccumulator, DigestAccumulator, ManifestAccumulator};
pub use walker::{Traversal, TraversalNode, Walker};
