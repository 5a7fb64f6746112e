//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `trellis-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `BlueprintStore`: Blueprint registry
//!   - `TemplateRenderer`: Token substitution
//!   - `ManifestWriter`: Package manifest
//!
//! - **Driving (Input) Ports**: the CLI calls `ScaffoldService` directly

pub mod output;

pub use output::{BlueprintStore, Filesystem, ManifestWriter, TemplateRenderer};

#[cfg(test)]
pub use output::{MockBlueprintStore, MockFilesystem, MockManifestWriter, MockTemplateRenderer};
