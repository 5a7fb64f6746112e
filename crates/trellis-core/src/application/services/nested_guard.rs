//! Refuses to generate a project inside an already generated one.

use std::path::Path;

use tracing::debug;

use crate::application::{ApplicationError, ports::Filesystem};

/// Marker file written at the root of every generated project.
pub const DEFAULT_MARKER: &str = ".trellis.json";

#[derive(Debug, Clone)]
pub struct NestedProjectGuard {
    marker: String,
}

impl Default for NestedProjectGuard {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

impl NestedProjectGuard {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Walk from `start` (inclusive) up to the filesystem root.
    ///
    /// # Errors
    ///
    /// `NestedProject` carrying the first marker found.
    pub fn check(&self, fs: &dyn Filesystem, start: &Path) -> Result<(), ApplicationError> {
        for dir in start.ancestors() {
            let candidate = dir.join(&self.marker);
            if fs.exists(&candidate) {
                debug!(marker = %candidate.display(), "Project marker found in ancestry");
                return Err(ApplicationError::NestedProject { marker: candidate });
            }
        }
        Ok(())
    }

    /// Whether `dir` itself holds the marker.
    pub fn is_project_root(&self, fs: &dyn Filesystem, dir: &Path) -> bool {
        fs.exists(&dir.join(&self.marker))
    }
}
