//! Unified error handling for Rebrand Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Rebrand Core operations.
///
/// This enum wraps all possible errors that can occur when using rebrand-core,
/// providing a unified interface for error handling.
#[derive(Debug, Error, Clone)]
pub enum RebrandError {
    /// Errors from the domain layer (rename rule violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration and I/O failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl RebrandError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Rebrand".into(),
                "Please report this issue at: https://github.com/cosecruz/rebrand/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Short human-readable cause without the layer prefix.
    ///
    /// Used for per-item failure records, where the layer is noise.
    pub fn cause(&self) -> String {
        match self {
            Self::Domain(e) => e.to_string(),
            Self::Application(ApplicationError::FilesystemError { reason, .. })
            | Self::Application(ApplicationError::TraversalFailed { reason, .. }) => reason.clone(),
            Self::Application(e) => e.to_string(),
            Self::Configuration { message } | Self::Internal { message } => message.clone(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type RebrandResult<T> = Result<T, RebrandError>;
