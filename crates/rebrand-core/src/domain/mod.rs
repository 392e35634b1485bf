// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Rebrand.
//!
//! This module contains pure rename logic with no I/O. Reading, writing and
//! moving files is done through ports (traits) defined in the application
//! layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem calls; paths are plain values
//! - **Few external crates**: std library + thiserror + serde derives
//! - **Immutable values**: specs and sets validate on construction
//!
// Public API - what the world sees
pub mod config;
pub mod error;
pub mod exclusion;
pub mod extensions;
pub mod policy;
pub mod record;
pub mod rename_spec;
pub mod snapshot;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use config::EngineConfig;
pub use error::{DomainError, ErrorCategory};
pub use exclusion::{DEFAULT_EXCLUDED_DIRS, DEFAULT_EXCLUDED_FILES, ExclusionSet};
pub use extensions::{DEFAULT_EXTENSIONS, EligibleExtensionSet};
pub use policy::{DecodePolicy, Decoded, RunMode};
pub use record::{Outcome, Phase, RenameRecord, RunReport, SkipReason};
pub use rename_spec::{RenameSpec, RenameSpecBuilder, Variant, VariantScope};
pub use snapshot::{EntryKind, PathSnapshot, TreeEntry};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    // ========================================================================
    // Cross-type behaviour
    // ========================================================================

    #[test]
    fn scenario_content_and_names() {
        let spec = RenameSpec::from_terms("term", "beta").unwrap();
        assert_eq!(spec.apply("Term value: alphaTERM"), "Beta value: alphaBETA");
        assert_eq!(spec.rename_name("alpha-term").as_deref(), Some("alpha-beta"));
        assert_eq!(spec.rename_name("notes.txt"), None);
    }

    #[test]
    fn eligibility_and_naming_are_independent() {
        let cfg = EngineConfig::for_terms("term", "beta").unwrap();
        let logo = Path::new("term-logo.png");
        assert!(!cfg.extensions.is_eligible(logo));
        assert!(cfg.spec.matches_name("term-logo.png"));
    }
}
