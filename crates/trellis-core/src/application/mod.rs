//! Application layer for Trellis.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService, BlueprintResolver,
//!   NestedProjectGuard)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    BlueprintInfo, BlueprintResolver, DEFAULT_MARKER, GenerationRequest, NestedProjectGuard,
    ScaffoldService,
};

pub use ports::{BlueprintStore, Filesystem, ManifestWriter, TemplateRenderer};

pub use error::{ApplicationError, TargetConflict};
