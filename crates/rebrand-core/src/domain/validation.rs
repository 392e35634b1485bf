use crate::domain::{config::EngineConfig, error::DomainError};

/// Centralized domain validation.
///
/// Specs and sets validate themselves on construction; this is the last
/// check before a run starts.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_config(config: &EngineConfig) -> Result<(), DomainError> {
        // A separator in a name target would move entries into other
        // directories instead of renaming them in place.
        for variant in config
            .spec
            .variants()
            .iter()
            .filter(|v| v.scope.applies_to_names())
        {
            if variant.target.contains(['/', '\\']) || variant.target.contains('\0') {
                return Err(DomainError::InvalidNameTarget {
                    target: variant.target.clone(),
                });
            }
        }
        Ok(())
    }
}
