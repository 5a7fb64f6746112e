//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `trellis-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{Blueprint, FileToWrite, RelativePath, RenderContext};
use crate::error::TrellisResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `trellis_adapters::filesystem::LocalFilesystem` (production)
/// - `trellis_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> TrellisResult<()>;

    /// Write content to a file, replacing any existing content.
    fn write_file(&self, path: &Path, content: &[u8]) -> TrellisResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// `true` when `path` is a directory with no entries.
    fn is_dir_empty(&self, path: &Path) -> TrellisResult<bool>;
}

/// Port for blueprint storage and retrieval.
///
/// Implemented by:
/// - `trellis_adapters::blueprint_store::InMemoryBlueprintStore`
#[cfg_attr(test, mockall::automock)]
pub trait BlueprintStore: Send + Sync {
    /// Get a blueprint by name.
    fn get(&self, name: &str) -> TrellisResult<Blueprint>;

    /// List all registered blueprints, sorted by name.
    fn list(&self) -> TrellisResult<Vec<Blueprint>>;

    /// Insert or replace a blueprint.
    fn insert(&self, blueprint: Blueprint) -> TrellisResult<()>;
}

/// Port for token substitution.
///
/// Implemented by:
/// - `trellis_adapters::renderer::SimpleRenderer`
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render a destination path template into a path inside the project.
    fn render_path(&self, template: &str, context: &RenderContext) -> TrellisResult<RelativePath>;

    /// Render file content.
    fn render_content(&self, content: &str, context: &RenderContext) -> TrellisResult<String>;
}

/// Port for the package manifest collaborator.
///
/// Receives the package identity and returns the manifest file to emit
/// (e.g. `package.json`). Implemented by
/// `trellis_adapters::manifest::JsonManifestWriter`.
#[cfg_attr(test, mockall::automock)]
pub trait ManifestWriter: Send + Sync {
    fn manifest(&self, package_name: &str) -> TrellisResult<FileToWrite>;
}
