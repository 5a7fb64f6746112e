//! Domain value objects: FileCategory, GenerationOptions.
//!
//! # Design
//!
//! Plain value types with no identity. `FileCategory` is tagged on every
//! blueprint entry when the blueprint is built or loaded, so the engine never
//! inspects file names to decide whether an entry is optional.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ── FileCategory ─────────────────────────────────────────────────────────────

/// What role a blueprint entry plays in the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileCategory {
    /// Always emitted.
    #[default]
    Core,
    /// Separate component template; dropped by `inline_template`.
    TemplateBody,
    /// Separate component stylesheet; dropped by `inline_style`.
    StyleBody,
    /// Test file; dropped by `skip_tests`.
    Spec,
}

impl FileCategory {
    pub const ALL: [Self; 4] = [Self::Core, Self::TemplateBody, Self::StyleBody, Self::Spec];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::TemplateBody => "template-body",
            Self::StyleBody => "style-body",
            Self::Spec => "spec",
        }
    }

    /// Whether `options` drop entries of this category.
    pub const fn is_excluded_by(self, options: &GenerationOptions) -> bool {
        match self {
            Self::Core => false,
            Self::TemplateBody => options.inline_template,
            Self::StyleBody => options.inline_style,
            Self::Spec => options.skip_tests,
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "core" => Ok(Self::Core),
            "template-body" | "template" => Ok(Self::TemplateBody),
            "style-body" | "style" => Ok(Self::StyleBody),
            "spec" | "test" => Ok(Self::Spec),
            other => Err(DomainError::InvalidBlueprint(format!(
                "unknown file category: {other}"
            ))),
        }
    }
}

// ── GenerationOptions ────────────────────────────────────────────────────────

/// Per-run switches. Built once, then only read.
///
/// ```rust
/// use trellis_core::domain::GenerationOptions;
///
/// let opts = GenerationOptions::new()
///     .with_directory("bar")
///     .with_dry_run(true)
///     .with_skip_tests(true);
///
/// assert!(opts.dry_run());
/// assert_eq!(opts.directory().unwrap().to_str(), Some("bar"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationOptions {
    directory: Option<PathBuf>,
    dry_run: bool,
    skip_install: bool,
    skip_git: bool,
    inline_template: bool,
    inline_style: bool,
    skip_tests: bool,
    force: bool,
}

impl GenerationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn with_dry_run(mut self, value: bool) -> Self {
        self.dry_run = value;
        self
    }

    pub fn with_skip_install(mut self, value: bool) -> Self {
        self.skip_install = value;
        self
    }

    pub fn with_skip_git(mut self, value: bool) -> Self {
        self.skip_git = value;
        self
    }

    pub fn with_inline_template(mut self, value: bool) -> Self {
        self.inline_template = value;
        self
    }

    pub fn with_inline_style(mut self, value: bool) -> Self {
        self.inline_style = value;
        self
    }

    pub fn with_skip_tests(mut self, value: bool) -> Self {
        self.skip_tests = value;
        self
    }

    /// Accept a non-empty target directory that holds no project marker.
    pub fn with_force(mut self, value: bool) -> Self {
        self.force = value;
        self
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub const fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub const fn skip_install(&self) -> bool {
        self.skip_install
    }

    pub const fn skip_git(&self) -> bool {
        self.skip_git
    }

    pub const fn inline_template(&self) -> bool {
        self.inline_template
    }

    pub const fn inline_style(&self) -> bool {
        self.inline_style
    }

    pub const fn skip_tests(&self) -> bool {
        self.skip_tests
    }

    pub const fn force(&self) -> bool {
        self.force
    }
}
