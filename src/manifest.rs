//! Insertion-ordered mapping from relative path to hex digest
//!
//! Entries keep traversal order, which differs from plain byte order of the
//! full paths (`a/b` is visited before `a.txt`). JSON output preserves that
//! order, and reading a manifest back keeps the file's order.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Path to digest mapping describing a tree's files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an entry.
    ///
    /// Overwriting keeps the original position and returns the old digest.
    pub fn insert(&mut self, path: impl Into<String>, digest: impl Into<String>) -> Option<String> {
        let path = path.into();
        let digest = digest.into();
        match self.index.get(&path) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position].1, digest)),
            None => {
                self.index.insert(path.clone(), self.entries.len());
                self.entries.push((path, digest));
                None
            }
        }
    }

    /// Remove an entry, keeping the order of the rest
    pub fn remove(&mut self, path: &str) -> Option<String> {
        let position = self.index.remove(path)?;
        let (_, digest) = self.entries.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Some(digest)
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.index
            .get(path)
            .map(|&position| self.entries[position].1.as_str())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, d)| (p.as_str(), d.as_str()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(p, _)| p.as_str())
    }

    /// Compare `self` (expected) against `actual`
    pub fn diff(&self, actual: &Manifest) -> ManifestDiff {
        let mut diff = ManifestDiff::default();
        for (path, expected) in self.iter() {
            match actual.get(path) {
                None => diff.missing.push(path.to_string()),
                Some(found) if found != expected => diff.changed.push(ChangedEntry {
                    path: path.to_string(),
                    expected: expected.to_string(),
                    actual: found.to_string(),
                }),
                Some(_) => {}
            }
        }
        for path in actual.paths() {
            if !self.contains(path) {
                diff.added.push(path.to_string());
            }
        }
        diff
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl<P: Into<String>, D: Into<String>> FromIterator<(P, D)> for Manifest {
    fn from_iter<I: IntoIterator<Item = (P, D)>>(iter: I) -> Self {
        let mut manifest = Manifest::new();
        for (path, digest) in iter {
            manifest.insert(path, digest);
        }
        manifest
    }
}

impl Serialize for Manifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (path, digest) in &self.entries {
            map.serialize_entry(path, digest)?;
        }
        map.end()
    }
}

struct ManifestVisitor;

impl<'de> Visitor<'de> for ManifestVisitor {
    type Value = Manifest;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object mapping relative paths to hex digests")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut manifest = Manifest::new();
        while let Some((path, digest)) = access.next_entry::<String, String>()? {
            manifest.insert(path, digest);
        }
        Ok(manifest)
    }
}

impl<'de> Deserialize<'de> for Manifest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ManifestVisitor)
    }
}

/// A path whose digest differs between two manifests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedEntry {
    pub path: String,
    pub expected: String,
    pub actual: String,
}

/// Differences between an expected and an actual manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestDiff {
    /// In actual only
    pub added: Vec<String>,
    /// In expected only
    pub missing: Vec<String>,
    pub changed: Vec<ChangedEntry>,
}

impl ManifestDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.missing.is_empty() && self.changed.is_empty()
    }
}

impl fmt::Display for ManifestDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for path in &self.missing {
            writeln!(f, "missing: {}", path)?;
        }
        for path in &self.added {
            writeln!(f, "added: {}", path)?;
        }
        for entry in &self.changed {
            writeln!(
                f,
                "changed: {} (expected {}, got {})",
                entry.path, entry.expected, entry.actual
            )?;
        }
        write!(
            f,
            "{} missing, {} added, {} changed",
            self.missing.len(),
            self.added.len(),
            self.changed.len()
        )
    }
}
