//! Digest accumulators fed by the walker
//!
//! The aggregate accumulator folds every directory path, file path and file
//! content into one streaming context. The manifest accumulator hashes each
//! file's content on its own and records it under the file's relative path.

use crate::digest::{digest_bytes, Algorithm, Digest, StreamingHasher};
use crate::manifest::Manifest;
use crate::tree::walker::TraversalNode;
use tracing::{trace, warn};

/// Consumes traversal nodes in order and produces a result
pub trait DigestAccumulator {
    type Output;

    fn visit_directory(&mut self, node: &TraversalNode);

    /// `content` is the file's full byte content
    fn visit_file(&mut self, node: &TraversalNode, content: &[u8]);

    fn finish(self) -> Self::Output;
}

/// Single rolling digest over a whole subtree
pub struct AggregateAccumulator {
    hasher: StreamingHasher,
}

impl AggregateAccumulator {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            hasher: StreamingHasher::new(algorithm),
        }
    }
}

impl DigestAccumulator for AggregateAccumulator {
    type Output = Digest;

    fn visit_directory(&mut self, node: &TraversalNode) {
        // The root's empty path contributes nothing
        if !node.is_root() {
            self.hasher.update(node.relative_path.as_bytes());
        }
    }

    fn visit_file(&mut self, node: &TraversalNode, content: &[u8]) {
        self.hasher.update(node.relative_path.as_bytes());
        self.hasher.update(content);
    }

    fn finish(self) -> Digest {
        self.hasher.finalize()
    }
}

/// Independent content digest per file
pub struct ManifestAccumulator {
    algorithm: Algorithm,
    manifest: Manifest,
}

impl ManifestAccumulator {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            manifest: Manifest::new(),
        }
    }
}

impl DigestAccumulator for ManifestAccumulator {
    type Output = Manifest;

    fn visit_directory(&mut self, _node: &TraversalNode) {}

    fn visit_file(&mut self, node: &TraversalNode, content: &[u8]) {
        let digest = digest_bytes(self.algorithm, content).to_hex();
        trace!(path = %node.relative_path, digest = %digest, "Hashed file");
        if let Some(previous) = self.manifest.insert(node.relative_path.clone(), digest) {
            warn!(
                path = %node.relative_path,
                previous = %previous,
                "Duplicate manifest path, keeping the later digest"
            );
        }
    }

    fn finish(self) -> Manifest {
        self.manifest
    }
}
