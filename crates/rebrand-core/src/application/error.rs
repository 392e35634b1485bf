//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not rename
//! rules. Rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The scan root cannot be enumerated. The only fatal run error.
    #[error("Cannot enumerate root {path}: {reason}")]
    RootUnreadable { path: PathBuf, reason: String },

    /// A directory below the root could not be listed.
    #[error("Cannot list {path}: {reason}")]
    TraversalFailed { path: PathBuf, reason: String },

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::RootUnreadable { path, .. } => vec![
                format!("Check that {} exists and is a directory", path.display()),
                "Pass the tree to rename as: rebrand run <ROOT>".into(),
            ],
            Self::TraversalFailed { path, .. } => vec![
                format!("Check read permissions on {}", path.display()),
                "Or exclude it with --exclude-dir".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RootUnreadable { .. } => ErrorCategory::NotFound,
            Self::FilesystemError { .. } | Self::TraversalFailed { .. } => ErrorCategory::Internal,
            Self::ValidationFailed(_) => ErrorCategory::Validation,
        }
    }
}
