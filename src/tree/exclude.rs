//! Exclusion rules applied to regular files before hashing
//!
//! Two rules are always active: AppleDouble sidecars (`._*`) and compiled
//! Python bytecode (`*.pyc`). Extra extension rules may be appended from
//! configuration but never replace the defaults.

use crate::tree::path;

/// A predicate over a relative path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionRule {
    /// Any segment starting with `._`
    AppleDouble,
    /// Path ends with `.<ext>` (case-sensitive)
    Extension(String),
}

impl ExclusionRule {
    /// Whether this rule rejects `relative_path`
    pub fn matches(&self, relative_path: &str) -> bool {
        match self {
            ExclusionRule::AppleDouble => {
                path::segments(relative_path).any(|segment| segment.starts_with("._"))
            }
            ExclusionRule::Extension(ext) => relative_path
                .strip_suffix(ext.as_str())
                .is_some_and(|rest| rest.ends_with('.')),
        }
    }
}

/// Ordered list of exclusion rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusions {
    rules: Vec<ExclusionRule>,
}

impl Default for Exclusions {
    fn default() -> Self {
        Self {
            rules: vec![
                ExclusionRule::AppleDouble,
                ExclusionRule::Extension("pyc".to_string()),
            ],
        }
    }
}

impl Exclusions {
    /// Default rules plus one extension rule per entry in `extensions`.
    ///
    /// A leading dot on an extension is accepted and stripped.
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut exclusions = Self::default();
        for ext in extensions {
            let ext = ext.as_ref().trim_start_matches('.');
            let rule = ExclusionRule::Extension(ext.to_string());
            if !ext.is_empty() && !exclusions.rules.contains(&rule) {
                exclusions.rules.push(rule);
            }
        }
        exclusions
    }

    /// Whether any rule rejects `relative_path`
    pub fn is_excluded(&self, relative_path: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(relative_path))
    }

    pub fn rules(&self) -> &[ExclusionRule] {
        &self.rules
    }
}
