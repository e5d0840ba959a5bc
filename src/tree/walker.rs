//! Filesystem walker for traversing directory structures
//!
//! The walk is depth-first over an explicit stack. Children of a directory are
//! sorted ascending by name, then pushed in reverse so that they pop in
//! ascending order. Each directory is emitted when it is popped, before any of
//! its descendants.

use crate::error::TraversalError;
use crate::tree::exclude::Exclusions;
use crate::tree::fs::{EntryKind, FileSystem, LocalFs};
use crate::tree::path;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// An entry produced by the walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalNode {
    pub absolute_path: PathBuf,
    /// Relative to the walk root, `/`-separated. Empty for the root itself.
    pub relative_path: String,
    /// Only `Directory` or `RegularFile`; other kinds are never emitted.
    pub kind: EntryKind,
}

impl TraversalNode {
    pub fn is_root(&self) -> bool {
        self.relative_path.is_empty()
    }
}

#[derive(Debug)]
struct Pending {
    absolute: PathBuf,
    relative: String,
}

/// Filesystem walker
pub struct Walker<F = LocalFs> {
    root: PathBuf,
    fs: F,
    exclusions: Exclusions,
}

impl Walker<LocalFs> {
    /// Create a new walker over the local filesystem
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_fs(root, LocalFs)
    }
}

impl<F: FileSystem> Walker<F> {
    /// Create a walker backed by a custom filesystem
    pub fn with_fs(root: impl Into<PathBuf>, fs: F) -> Self {
        Self {
            root: root.into(),
            fs,
            exclusions: Exclusions::default(),
        }
    }

    pub fn with_exclusions(mut self, exclusions: Exclusions) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn exclusions(&self) -> &Exclusions {
        &self.exclusions
    }

    /// Lazily walk the tree in canonical order
    pub fn iter(&self) -> Traversal<'_, F> {
        Traversal {
            fs: &self.fs,
            exclusions: &self.exclusions,
            stack: vec![Pending {
                absolute: self.root.clone(),
                relative: String::new(),
            }],
            at_root: true,
        }
    }

    /// Walk the whole tree and collect every emitted node
    pub fn walk(&self) -> Result<Vec<TraversalNode>, TraversalError> {
        self.iter().collect()
    }
}

impl<'a, F: FileSystem> IntoIterator for &'a Walker<F> {
    type Item = Result<TraversalNode, TraversalError>;
    type IntoIter = Traversal<'a, F>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy traversal over a [`Walker`]'s tree.
///
/// Yields at most one error, after which the traversal is exhausted.
pub struct Traversal<'a, F> {
    fs: &'a F,
    exclusions: &'a Exclusions,
    stack: Vec<Pending>,
    at_root: bool,
}

impl<F: FileSystem> Traversal<'_, F> {
    fn fail(&mut self, err: TraversalError) -> Option<Result<TraversalNode, TraversalError>> {
        self.stack.clear();
        Some(Err(err))
    }
}

impl<F: FileSystem> Iterator for Traversal<'_, F> {
    type Item = Result<TraversalNode, TraversalError>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(pending) = self.stack.pop() {
            let is_root = std::mem::take(&mut self.at_root);

            let classified = if is_root {
                self.fs.stat_root(&pending.absolute)
            } else {
                self.fs.stat(&pending.absolute)
            };
            let kind = match classified {
                Ok(EntryKind::Other) if is_root => {
                    return self.fail(TraversalError::RootNotFound {
                        path: pending.absolute,
                        source: io::Error::new(
                            io::ErrorKind::InvalidInput,
                            "not a regular file or directory",
                        ),
                    });
                }
                Ok(kind) => kind,
                Err(source) if is_root => {
                    return self.fail(TraversalError::RootNotFound {
                        path: pending.absolute,
                        source,
                    });
                }
                Err(source)
                    if matches!(
                        source.kind(),
                        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
                    ) =>
                {
                    warn!(
                        path = %pending.absolute.display(),
                        error = %source,
                        "Entry disappeared or became unreadable during walk, skipping"
                    );
                    continue;
                }
                Err(source) => {
                    return self.fail(TraversalError::Read {
                        path: pending.absolute,
                        source,
                    });
                }
            };

            match kind {
                EntryKind::Directory => {
                    let mut children = match self.fs.list_children(&pending.absolute) {
                        Ok(children) => children,
                        Err(source) => {
                            return self.fail(TraversalError::List {
                                path: pending.absolute,
                                source,
                            });
                        }
                    };
                    children.sort();
                    debug!(
                        path = %pending.relative,
                        children = children.len(),
                        "Listed directory"
                    );

                    for name in children.into_iter().rev() {
                        let absolute = pending.absolute.join(&name);
                        let Some(relative) = path::join_relative(&pending.relative, &name) else {
                            return self.fail(TraversalError::InvalidName { path: absolute });
                        };
                        self.stack.push(Pending { absolute, relative });
                    }

                    return Some(Ok(TraversalNode {
                        absolute_path: pending.absolute,
                        relative_path: pending.relative,
                        kind,
                    }));
                }
                EntryKind::RegularFile => {
                    if self.exclusions.is_excluded(&pending.relative) {
                        trace!(path = %pending.relative, "Excluded file");
                        continue;
                    }
                    return Some(Ok(TraversalNode {
                        absolute_path: pending.absolute,
                        relative_path: pending.relative,
                        kind,
                    }));
                }
                EntryKind::Other => {
                    trace!(path = %pending.relative, "Skipping non-regular entry");
                }
            }
        }

        None
    }
}
