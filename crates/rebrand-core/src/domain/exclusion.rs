//! Exclusion rules for the tree walk.

use std::collections::BTreeSet;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Directory names pruned by default: VCS metadata, build outputs, caches.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "bin",
    "obj",
    "__pycache__",
    ".vs",
    ".vscode",
    "target",
];

/// File names never touched by default (the tool's own local config).
pub const DEFAULT_EXCLUDED_FILES: &[&str] = &[".rebrand.toml"];

/// Directory and file tokens that disqualify a path.
///
/// Tokens are compared against whole path components, never substrings:
/// excluding `bin` does not exclude `binary/` or `cabin.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionSet {
    dirs: BTreeSet<String>,
    files: BTreeSet<String>,
}

impl ExclusionSet {
    /// An empty set; nothing is excluded.
    pub fn empty() -> Self {
        Self {
            dirs: BTreeSet::new(),
            files: BTreeSet::new(),
        }
    }

    pub fn new<D, F>(dirs: D, files: F) -> Result<Self, DomainError>
    where
        D: IntoIterator,
        D::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        let mut set = Self::empty();
        for dir in dirs {
            set.add_dir(dir)?;
        }
        for file in files {
            set.add_file(file)?;
        }
        Ok(set)
    }

    pub fn add_dir(&mut self, token: impl Into<String>) -> Result<(), DomainError> {
        let token = validate_token(token.into())?;
        self.dirs.insert(token);
        Ok(())
    }

    pub fn add_file(&mut self, token: impl Into<String>) -> Result<(), DomainError> {
        let token = validate_token(token.into())?;
        self.files.insert(token);
        Ok(())
    }

    pub fn dirs(&self) -> impl Iterator<Item = &str> {
        self.dirs.iter().map(String::as_str)
    }

    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }

    /// `true` if a directory with this exact name must not be descended into.
    pub fn is_excluded_dir_name(&self, name: &str) -> bool {
        self.dirs.contains(name)
    }

    /// `true` if a file with this exact name must be left alone.
    pub fn is_excluded_file_name(&self, name: &str) -> bool {
        self.files.contains(name)
    }

    /// Check a path relative to the scan root.
    ///
    /// Excluded when any component is an excluded directory token, or when a
    /// file's own name is an excluded file token.
    pub fn excludes(&self, relative: &Path, is_dir: bool) -> bool {
        let mut components = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(name) => Some(name),
                _ => None,
            })
            .peekable();

        while let Some(name) = components.next() {
            let Some(name) = name.to_str() else {
                continue;
            };
            let is_last = components.peek().is_none();
            if (!is_last || is_dir) && self.dirs.contains(name) {
                return true;
            }
            if is_last && !is_dir && self.files.contains(name) {
                return true;
            }
        }
        false
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self {
            dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            files: DEFAULT_EXCLUDED_FILES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn validate_token(token: String) -> Result<String, DomainError> {
    let token = token.trim().to_string();
    if token.is_empty() {
        return Err(DomainError::InvalidExclusion {
            token,
            reason: "token is empty".into(),
        });
    }
    if token.contains('/') || token.contains('\\') {
        return Err(DomainError::InvalidExclusion {
            token,
            reason: "token must be a single path component".into(),
        });
    }
    if token == "." || token == ".." {
        return Err(DomainError::InvalidExclusion {
            token,
            reason: "relative path markers cannot be excluded".into(),
        });
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_excludes_vcs_and_build_dirs() {
        let set = ExclusionSet::default();
        assert!(set.is_excluded_dir_name(".git"));
        assert!(set.is_excluded_dir_name("node_modules"));
        assert!(set.is_excluded_file_name(".rebrand.toml"));
    }

    #[test]
    fn nested_component_excludes_whole_subtree() {
        let set = ExclusionSet::default();
        assert!(set.excludes(Path::new("src/app/node_modules/pkg/index.js"), false));
        assert!(set.excludes(Path::new("a/b/c/__pycache__"), true));
        assert!(!set.excludes(Path::new("src/app/index.js"), false));
    }

    #[test]
    fn tokens_match_whole_components_only() {
        let set = ExclusionSet::default();
        assert!(!set.excludes(Path::new("binary/cabin.txt"), false));
        assert!(!set.excludes(Path::new("docs/my.rebrand.toml"), false));
        assert!(set.excludes(Path::new("docs/.rebrand.toml"), false));
    }

    #[test]
    fn file_named_like_excluded_dir_is_kept() {
        // A regular file called `bin` is not a directory.
        let set = ExclusionSet::default();
        assert!(!set.excludes(Path::new("scripts/bin"), false));
        assert!(set.excludes(Path::new("scripts/bin"), true));
    }

    #[test]
    fn rejects_multi_component_tokens() {
        let mut set = ExclusionSet::empty();
        assert!(matches!(
            set.add_dir("a/b"),
            Err(DomainError::InvalidExclusion { .. })
        ));
        assert!(set.add_dir("  ").is_err());
        assert!(set.add_file("..").is_err());
    }
}
