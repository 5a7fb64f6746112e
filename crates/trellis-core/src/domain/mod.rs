//! Core domain layer for Trellis.
//!
//! Pure logic: name validation, directory resolution, the blueprint model and
//! the rendered file plan. All I/O goes through ports defined in the
//! application layer.
//!
//! - **No I/O**: no filesystem or process calls
//! - **Immutable values**: identities, options and blueprints are only read
//!   once built
pub mod directory;
pub mod entities;
pub mod error;
pub mod generation;
pub mod naming;
pub mod value_objects;

mod validation;

pub use directory::{DirectoryResolver, ResolvedDirectory};
pub use entities::{
    blueprint::{
        Blueprint, BlueprintBuilder, BlueprintEntry, BlueprintMetadata, RenameTable,
        TemplateSource,
    },
    common::RelativePath,
    project_structure::{FileToWrite, ProjectStructure},
    render_context::{NAME_SENTINEL, RenderContext},
};
pub use error::{DomainError, ErrorCategory, InvalidNameReason};
pub use generation::{GenerationResult, GenerationStage};
pub use naming::{NameValidator, ProjectIdentity, dasherize, to_pascal_case, to_snake_case};
pub use validation::DomainValidator;
pub use value_objects::{FileCategory, GenerationOptions};
