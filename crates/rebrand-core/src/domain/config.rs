//! Everything one engine run depends on, bundled as a value.

use crate::domain::{
    error::DomainError,
    exclusion::ExclusionSet,
    extensions::EligibleExtensionSet,
    policy::{DecodePolicy, RunMode},
    rename_spec::RenameSpec,
};

/// Engine configuration.
///
/// The engine is a function of `(root, EngineConfig)`; there are no
/// process-wide constants behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub spec: RenameSpec,
    pub exclusions: ExclusionSet,
    pub extensions: EligibleExtensionSet,
    pub on_decode_error: DecodePolicy,
    pub mode: RunMode,
}

impl EngineConfig {
    /// Default exclusions, extensions and policies for a term pair.
    pub fn for_terms(from: &str, to: &str) -> Result<Self, DomainError> {
        Ok(Self::new(RenameSpec::from_terms(from, to)?))
    }

    pub fn new(spec: RenameSpec) -> Self {
        Self {
            spec,
            exclusions: ExclusionSet::default(),
            extensions: EligibleExtensionSet::default(),
            on_decode_error: DecodePolicy::default(),
            mode: RunMode::default(),
        }
    }

    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn with_extensions(mut self, extensions: EligibleExtensionSet) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.on_decode_error = policy;
        self
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_applied() {
        let cfg = EngineConfig::for_terms("maestro", "artifex").unwrap();
        assert_eq!(cfg.mode, RunMode::Apply);
        assert_eq!(cfg.on_decode_error, DecodePolicy::Skip);
        assert!(cfg.exclusions.is_excluded_dir_name(".git"));
    }

    #[test]
    fn invalid_terms_surface_domain_error() {
        assert!(EngineConfig::for_terms("x", "x").is_err());
    }
}
