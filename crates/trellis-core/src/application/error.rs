//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::error::ErrorCategory;

/// Why an existing target directory blocks generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetConflict {
    /// Holds a project marker: it is already a generated project.
    ContainsMarker,
    /// Non-empty and `force` was not given.
    NotEmpty,
    /// Exists but is not a directory.
    NotADirectory,
}

impl fmt::Display for TargetConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ContainsMarker => "it already contains a generated project",
            Self::NotEmpty => "it is not empty",
            Self::NotADirectory => "it is not a directory",
        })
    }
}

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A project marker was found in the starting directory or an ancestor.
    #[error("Cannot generate a project inside another project (found {})", marker.display())]
    NestedProject { marker: PathBuf },

    /// Target directory already exists and cannot be used.
    #[error("Target directory {} cannot be used: {reason}", path.display())]
    TargetExists {
        path: PathBuf,
        reason: TargetConflict,
    },

    /// Filesystem write failed. Already-written files are left in place.
    #[error("Filesystem error at {}: {reason}", path.display())]
    FilesystemWrite { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned).
    #[error("Blueprint store error")]
    StoreLockError,

    /// Token substitution failed.
    #[error("Rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Package manifest could not be produced.
    #[error("Package manifest failed: {reason}")]
    ManifestFailed { reason: String },

    /// A blueprint directory could not be loaded.
    #[error("Failed to load blueprint from {}: {reason}", path.display())]
    BlueprintLoad { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NestedProject { marker } => vec![
                format!("A generated project already exists at {}", marker.parent().unwrap_or(marker).display()),
                "Run the command from outside that project".into(),
            ],
            Self::TargetExists { path, reason } => match reason {
                TargetConflict::NotEmpty => vec![
                    format!("Directory is not empty: {}", path.display()),
                    "Use --force to generate into it anyway".into(),
                    "Or pass --directory to pick another location".into(),
                ],
                _ => vec![
                    format!("Cannot use: {}", path.display()),
                    "Choose a different project name or --directory".into(),
                ],
            },
            Self::FilesystemWrite { path, .. } => vec![
                format!("Failed to write: {}", path.display()),
                "Check that you have write permissions".into(),
                "Files written before the failure were left in place".into(),
            ],
            Self::StoreLockError => vec![
                "The blueprint store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::BlueprintLoad { path, .. } => vec![
                format!("Check {}", path.join("blueprint.toml").display()),
                "Each entry needs a matching file under files/".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NestedProject { .. } | Self::TargetExists { .. } => ErrorCategory::Conflict,
            Self::BlueprintLoad { .. } => ErrorCategory::Blueprint,
            Self::FilesystemWrite { .. }
            | Self::StoreLockError
            | Self::RenderingFailed { .. }
            | Self::ManifestFailed { .. } => ErrorCategory::Internal,
        }
    }

    /// Stable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NestedProject { .. } => "nested-project",
            Self::TargetExists { .. } => "target-exists",
            Self::FilesystemWrite { .. } => "filesystem-write",
            Self::StoreLockError => "store-lock",
            Self::RenderingFailed { .. } => "rendering-failed",
            Self::ManifestFailed { .. } => "manifest-failed",
            Self::BlueprintLoad { .. } => "blueprint-load",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_exists_message_names_reason() {
        let err = ApplicationError::TargetExists {
            path: PathBuf::from("/work/foo"),
            reason: TargetConflict::NotEmpty,
        };
        assert_eq!(
            err.to_string(),
            "Target directory /work/foo cannot be used: it is not empty"
        );
        assert_eq!(err.code(), "target-exists");
        assert!(err.suggestions().iter().any(|s| s.contains("--force")));
    }

    #[test]
    fn nested_project_is_a_conflict() {
        let err = ApplicationError::NestedProject {
            marker: PathBuf::from("/work/app/.trellis.json"),
        };
        assert_eq!(err.category(), ErrorCategory::Conflict);
        assert_eq!(err.code(), "nested-project");
        assert!(err.suggestions()[0].contains("/work/app"));
    }
}
