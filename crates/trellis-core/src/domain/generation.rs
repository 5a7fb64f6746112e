//! Generation run state and outcome.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use uuid::Uuid;

use crate::domain::naming::ProjectIdentity;

/// Stage of a generation run.
///
/// ```text
/// Validating → DirectoryResolved → GuardChecked → BlueprintResolved
///            → Materializing → Done
/// ```
///
/// Any stage may short-circuit to `Failed`. Nothing is written before
/// `Materializing`, and nothing at all under dry-run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "stage", content = "reason")]
pub enum GenerationStage {
    Validating,
    DirectoryResolved,
    GuardChecked,
    BlueprintResolved,
    Materializing,
    Done,
    Failed(String),
}

impl GenerationStage {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Validating => "validating",
            Self::DirectoryResolved => "directory-resolved",
            Self::GuardChecked => "guard-checked",
            Self::BlueprintResolved => "blueprint-resolved",
            Self::Materializing => "materializing",
            Self::Done => "done",
            Self::Failed(_) => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed(_))
    }
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(reason) => write!(f, "failed ({reason})"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    /// Correlates log lines of one run.
    pub run_id: Uuid,

    pub blueprint: String,
    pub target_directory: PathBuf,

    /// Where the run leaves the caller: the target, or the start directory
    /// under dry-run.
    pub working_directory: PathBuf,

    pub identity: ProjectIdentity,
    pub package_identity: String,

    /// Absolute paths, in write order. Under dry-run these are the paths that
    /// would have been written.
    pub materialized_files: Vec<PathBuf>,

    pub dry_run: bool,
    pub stage: GenerationStage,

    /// Install command declared by the blueprint, if any.
    pub install_command: Option<Vec<String>>,
}

impl GenerationResult {
    pub fn file_count(&self) -> usize {
        self.materialized_files.len()
    }

    /// Materialized files relative to the target directory.
    pub fn relative_files(&self) -> impl Iterator<Item = &Path> {
        self.materialized_files
            .iter()
            .filter_map(|p| p.strip_prefix(&self.target_directory).ok())
    }
}
