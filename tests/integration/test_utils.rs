//! Shared test utilities for integration tests
//!
//! Provides an in-memory filesystem with controllable listing order and
//! injected failures, and isolation of config-related environment variables.

use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;
use treesum::tree::{EntryKind, FileSystem};

/// Order in which [`MemoryFs::list_children`] returns names
#[derive(Debug, Clone, Copy)]
pub enum ListingOrder {
    Sorted,
    Reversed,
    /// Rotate by `seed`, then reverse when `seed` is odd
    Permuted(u64),
}

#[derive(Debug, Clone)]
enum MemEntry {
    Dir,
    File(Vec<u8>),
    Other,
}

/// In-memory filesystem rooted at `/mem`
#[derive(Debug, Clone)]
pub struct MemoryFs {
    entries: BTreeMap<PathBuf, MemEntry>,
    phantoms: BTreeSet<PathBuf>,
    unlistable: BTreeSet<PathBuf>,
    unreadable: BTreeSet<PathBuf>,
    order: ListingOrder,
}

impl MemoryFs {
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(Self::root(), MemEntry::Dir);
        Self {
            entries,
            phantoms: BTreeSet::new(),
            unlistable: BTreeSet::new(),
            unreadable: BTreeSet::new(),
            order: ListingOrder::Sorted,
        }
    }

    pub fn root() -> PathBuf {
        PathBuf::from("/mem")
    }

    pub fn path(relative: &str) -> PathBuf {
        let mut path = Self::root();
        for segment in relative.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path
    }

    pub fn with_order(mut self, order: ListingOrder) -> Self {
        self.order = order;
        self
    }

    fn ensure_parents(&mut self, path: &Path) {
        let mut current = path.parent();
        while let Some(dir) = current {
            if dir == Self::root().as_path() || !dir.starts_with(Self::root()) {
                break;
            }
            self.entries.entry(dir.to_path_buf()).or_insert(MemEntry::Dir);
            current = dir.parent();
        }
    }

    pub fn add_dir(&mut self, relative: &str) -> &mut Self {
        let path = Self::path(relative);
        self.ensure_parents(&path);
        self.entries.insert(path, MemEntry::Dir);
        self
    }

    pub fn add_file(&mut self, relative: &str, content: &[u8]) -> &mut Self {
        let path = Self::path(relative);
        self.ensure_parents(&path);
        self.entries.insert(path, MemEntry::File(content.to_vec()));
        self
    }

    /// A symlink, socket or device
    pub fn add_other(&mut self, relative: &str) -> &mut Self {
        let path = Self::path(relative);
        self.ensure_parents(&path);
        self.entries.insert(path, MemEntry::Other);
        self
    }

    /// Listed by its parent but gone by the time it is classified
    pub fn add_phantom(&mut self, relative: &str) -> &mut Self {
        let path = Self::path(relative);
        self.ensure_parents(&path);
        self.phantoms.insert(path);
        self
    }

    pub fn fail_list(&mut self, relative: &str) -> &mut Self {
        self.unlistable.insert(Self::path(relative));
        self
    }

    pub fn fail_read(&mut self, relative: &str) -> &mut Self {
        self.unreadable.insert(Self::path(relative));
        self
    }

    fn apply_order(&self, mut names: Vec<OsString>) -> Vec<OsString> {
        names.sort();
        match self.order {
            ListingOrder::Sorted => {}
            ListingOrder::Reversed => names.reverse(),
            ListingOrder::Permuted(seed) => {
                if !names.is_empty() {
                    let len = names.len();
                    names.rotate_left((seed as usize) % len);
                }
                if seed % 2 == 1 {
                    names.reverse();
                }
            }
        }
        names
    }
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
}

impl FileSystem for MemoryFs {
    fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        match self.entries.get(path) {
            Some(MemEntry::Dir) => Ok(EntryKind::Directory),
            Some(MemEntry::File(_)) => Ok(EntryKind::RegularFile),
            Some(MemEntry::Other) => Ok(EntryKind::Other),
            None => Err(not_found(path)),
        }
    }

    fn list_children(&self, path: &Path) -> io::Result<Vec<OsString>> {
        if self.unlistable.contains(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "listing denied"));
        }
        let names = self
            .entries
            .keys()
            .chain(self.phantoms.iter())
            .filter(|candidate| candidate.parent() == Some(path))
            .filter_map(|candidate| candidate.file_name().map(|n| n.to_os_string()))
            .collect();
        Ok(self.apply_order(names))
    }

    fn read_all(&self, path: &Path) -> io::Result<Vec<u8>> {
        if self.unreadable.contains(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read denied"));
        }
        match self.entries.get(path) {
            Some(MemEntry::File(content)) => Ok(content.clone()),
            _ => Err(not_found(path)),
        }
    }
}

/// Global mutex to serialize config environment variable access across tests
static CONFIG_ENV_MUTEX: Mutex<()> = Mutex::new(());

const ISOLATED_VARS: &[&str] = &[
    "HOME",
    "XDG_CONFIG_HOME",
    "TREESUM_ENV",
    "TREESUM_HASHING__MODE",
    "TREESUM_HASHING__ALGORITHM",
    "TREESUM_HASHING__EXCLUDE_EXTENSIONS",
    "TREESUM_OUTPUT__MANIFEST_FILE",
];

/// Run `f` with XDG_CONFIG_HOME pointing at `test_dir/config`, HOME at
/// `test_dir/home` and all TREESUM_* config variables cleared.
/// The original environment is restored afterwards.
pub fn with_isolated_config_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = CONFIG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let saved: Vec<(&str, Option<OsString>)> = ISOLATED_VARS
        .iter()
        .map(|name| (*name, std::env::var_os(name)))
        .collect();

    let config_home = test_dir.path().join("config");
    let home = test_dir.path().join("home");
    std::fs::create_dir_all(&config_home).unwrap();
    std::fs::create_dir_all(&home).unwrap();

    for name in ISOLATED_VARS {
        std::env::remove_var(name);
    }
    std::env::set_var("HOME", &home);
    std::env::set_var("XDG_CONFIG_HOME", &config_home);

    let result = f();

    for (name, value) in saved {
        match value {
            Some(value) => std::env::set_var(name, value),
            None => std::env::remove_var(name),
        }
    }

    result
}
