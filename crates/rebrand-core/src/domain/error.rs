// ============================================================================
// domain/error.rs - RENAME DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports and CLI wrappers hold copies)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Rename spec errors
    // ========================================================================
    #[error("Rename term cannot be empty ({side})")]
    EmptyTerm { side: &'static str },

    #[error("Source and target terms are identical: '{term}'")]
    IdenticalTerms { term: String },

    #[error("Variant source cannot be empty")]
    EmptyVariantSource,

    #[error("Target '{target}' contains source variant '{source_variant}'; repeated runs would not converge")]
    SelfReferentialVariant {
        target: String,
        source_variant: String,
    },

    #[error("Target '{target}' can combine with neighbouring text into '{source_variant}'; repeated runs would not converge")]
    OverlappingVariant {
        target: String,
        source_variant: String,
    },

    #[error("Name target '{target}' contains a path separator")]
    InvalidNameTarget { target: String },

    // ========================================================================
    // Scan configuration errors
    // ========================================================================
    #[error("Invalid exclusion token '{token}': {reason}")]
    InvalidExclusion { token: String, reason: String },

    #[error("Invalid file extension '{extension}': {reason}")]
    InvalidExtension { extension: String, reason: String },

    #[error("Unknown decode policy '{0}'")]
    UnknownDecodePolicy(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyTerm { side } => vec![
                format!("Provide a non-empty {side} term"),
                "Example: rebrand run --from maestro --to artifex".into(),
            ],
            Self::IdenticalTerms { term } => vec![
                format!("Renaming '{term}' to itself would change nothing"),
                "Pick a different --to value".into(),
            ],
            Self::SelfReferentialVariant {
                target,
                source_variant,
            } => vec![
                format!("'{target}' still contains '{source_variant}' after replacement"),
                "Choose a target that does not embed the source term".into(),
                "Or rename in two steps through an intermediate name".into(),
            ],
            Self::OverlappingVariant {
                target,
                source_variant,
            } => vec![
                format!("Text ending or starting next to '{target}' can spell '{source_variant}' again"),
                "Choose a target that shares no prefix or suffix with the source term".into(),
                "Or rename in two steps through an intermediate name".into(),
            ],
            Self::InvalidNameTarget { target } => vec![
                format!("'{target}' would move entries instead of renaming them"),
                "Use a target without '/' or '\\'".into(),
            ],
            Self::InvalidExclusion { .. } => vec![
                "Exclusion tokens are single path components (e.g. node_modules)".into(),
                "Remove path separators from the token".into(),
            ],
            Self::InvalidExtension { .. } => vec![
                "Extensions are bare suffixes such as 'rs' or '.toml'".into(),
            ],
            Self::UnknownDecodePolicy(_) => {
                vec!["Valid decode policies: skip, lossy, fail".into()]
            }
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyTerm { .. }
            | Self::IdenticalTerms { .. }
            | Self::EmptyVariantSource
            | Self::SelfReferentialVariant { .. }
            | Self::OverlappingVariant { .. }
            | Self::InvalidNameTarget { .. } => ErrorCategory::Validation,
            Self::InvalidExclusion { .. }
            | Self::InvalidExtension { .. }
            | Self::UnknownDecodePolicy(_) => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_referential_suggests_intermediate_name() {
        let err = DomainError::SelfReferentialVariant {
            target: "user-ui".into(),
            source_variant: "ui".into(),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("intermediate")));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn decode_policy_error_is_configuration() {
        let err = DomainError::UnknownDecodePolicy("maybe".into());
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.to_string().contains("maybe"));
    }
}
