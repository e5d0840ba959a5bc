//! Relative path computation for traversal nodes
//!
//! Relative paths are always computed against the original root and always
//! use `/` as the separator, whatever the host platform uses.

use std::ffi::OsStr;
use std::path::Path;

/// Separator used in every relative path
pub const SEPARATOR: char = '/';

/// Relative path of a child named `name` inside the directory at `parent`.
///
/// The root's own relative path is the empty string, so its children get no
/// leading separator. Returns `None` when `name` is not valid UTF-8, since a
/// lossy conversion would map distinct names onto one path.
pub fn join_relative(parent: &str, name: &OsStr) -> Option<String> {
    let name = normalize_separators(name.to_str()?);
    if parent.is_empty() {
        Some(name)
    } else {
        let mut joined = String::with_capacity(parent.len() + 1 + name.len());
        joined.push_str(parent);
        joined.push(SEPARATOR);
        joined.push_str(&name);
        Some(joined)
    }
}

/// Replace platform separators with `/`
pub fn normalize_separators(path: &str) -> String {
    if std::path::MAIN_SEPARATOR == SEPARATOR {
        path.to_string()
    } else {
        path.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

/// Relative path of `path` under `root`, in walker form.
///
/// Both paths are taken as given; canonicalize first if they may differ in
/// form. Returns `None` when `path` is not inside `root`.
pub fn relative_within(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let segments: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    Some(segments.join("/"))
}

/// Iterate over the segments of a relative path
pub fn segments(relative: &str) -> impl Iterator<Item = &str> {
    relative.split(SEPARATOR).filter(|s| !s.is_empty())
}
