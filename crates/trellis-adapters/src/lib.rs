//! Infrastructure adapters for Trellis.
//!
//! This crate implements the ports defined in `trellis-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod blueprint_loader;
pub mod blueprint_store;
pub mod builtin_blueprints;
pub mod filesystem;
pub mod manifest;
pub mod renderer;

// Re-export commonly used adapters
pub use blueprint_loader::FilesystemBlueprintLoader;
pub use blueprint_store::InMemoryBlueprintStore;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use manifest::JsonManifestWriter;
pub use renderer::SimpleRenderer;
