//! File extensions eligible for content rewriting.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Common source, config, and doc text formats.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "cs",
    "csproj",
    "sln",
    "json",
    "yml",
    "yaml",
    "md",
    "txt",
    "py",
    "sh",
    "config",
    "xml",
    "dockerfile",
    "env",
    "sql",
    "toml",
    "rs",
];

/// Set of file suffixes (stored without the leading dot).
///
/// The extension of a file is the text after the last `.` in its name, so
/// `.env` has extension `env` and `Dockerfile` has none. Comparison is
/// case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibleExtensionSet(BTreeSet<String>);

impl EligibleExtensionSet {
    pub fn new<I>(extensions: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut set = Self(BTreeSet::new());
        for ext in extensions {
            set.add(ext)?;
        }
        Ok(set)
    }

    /// Add an extension; a single leading dot is accepted and stripped.
    pub fn add(&mut self, extension: impl Into<String>) -> Result<(), DomainError> {
        let raw = extension.into();
        let ext = raw.trim().strip_prefix('.').unwrap_or(raw.trim());
        if ext.is_empty() || ext.contains(['.', '/', '\\']) {
            return Err(DomainError::InvalidExtension {
                extension: raw.clone(),
                reason: "expected a bare suffix like 'rs'".into(),
            });
        }
        self.0.insert(ext.to_string());
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// `true` if the file at `path` is eligible for content rewriting.
    pub fn is_eligible(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .and_then(extension_of)
            .is_some_and(|ext| self.0.contains(ext))
    }
}

impl Default for EligibleExtensionSet {
    fn default() -> Self {
        Self(DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect())
    }
}

fn extension_of(name: &str) -> Option<&str> {
    name.rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}
