//! Filesystem access used by the walker and the accumulators

use std::ffi::OsString;
use std::io;
use std::path::Path;

/// Classification of a filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    RegularFile,
    /// Symlinks, sockets, devices, fifos. Never descended into, never hashed.
    Other,
}

/// Fallible filesystem operations the traversal depends on.
///
/// `list_children` may return names in any order; the walker sorts them.
pub trait FileSystem {
    /// Classify `path` without following symlinks
    fn stat(&self, path: &Path) -> io::Result<EntryKind>;

    /// Classify the walk root. A root given as a symlink names its target.
    fn stat_root(&self, path: &Path) -> io::Result<EntryKind> {
        self.stat(path)
    }

    /// Names of the immediate children of a directory
    fn list_children(&self, path: &Path) -> io::Result<Vec<OsString>>;

    /// Full content of a regular file
    fn read_all(&self, path: &Path) -> io::Result<Vec<u8>>;
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        (**self).stat(path)
    }

    fn stat_root(&self, path: &Path) -> io::Result<EntryKind> {
        (**self).stat_root(path)
    }

    fn list_children(&self, path: &Path) -> io::Result<Vec<OsString>> {
        (**self).list_children(path)
    }

    fn read_all(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read_all(path)
    }
}

/// The local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

fn classify(file_type: std::fs::FileType) -> EntryKind {
    if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::RegularFile
    } else {
        EntryKind::Other
    }
}

impl FileSystem for LocalFs {
    fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        Ok(classify(std::fs::symlink_metadata(path)?.file_type()))
    }

    fn stat_root(&self, path: &Path) -> io::Result<EntryKind> {
        Ok(classify(std::fs::metadata(path)?.file_type()))
    }

    fn list_children(&self, path: &Path) -> io::Result<Vec<OsString>> {
        std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect()
    }

    fn read_all(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}
