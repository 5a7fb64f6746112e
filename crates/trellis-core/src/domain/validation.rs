use crate::domain::{
    entities::{Blueprint, ProjectStructure},
    error::DomainError,
    naming::{NameValidator, ProjectIdentity},
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_name(raw: &str) -> Result<ProjectIdentity, DomainError> {
        NameValidator::validate(raw)
    }

    pub fn validate_blueprint(blueprint: &Blueprint) -> Result<(), DomainError> {
        blueprint.validate()
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }
}
