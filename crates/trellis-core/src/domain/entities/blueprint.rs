//! Blueprint aggregate: the ordered file manifest a project is generated from.
//!
//! ## Structure
//!
//! ```text
//! Blueprint
//! ├── BlueprintMetadata   name, description, version, install command
//! ├── Vec<BlueprintEntry> source path, destination template, category, content
//! └── RenameTable         source path → destination (identity independent)
//! ```
//!
//! Entries keep their declaration order; the engine materializes them in that
//! order. A blueprint is built once (compile-time tables or the filesystem
//! loader) and then only read.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::domain::{
    entities::common::RelativePath, error::DomainError, value_objects::FileCategory,
};

// ============================================================================
// Content
// ============================================================================

/// Backing storage for entry content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Compile-time string literal.
    Static(&'static str),

    /// Runtime-owned string (filesystem-loaded blueprints).
    Owned(String),

    /// Non UTF-8 asset, copied verbatim with no token substitution.
    Binary(Vec<u8>),
}

impl From<&'static str> for TemplateSource {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

impl From<String> for TemplateSource {
    fn from(s: String) -> Self {
        Self::Owned(s)
    }
}

impl From<Vec<u8>> for TemplateSource {
    /// Text when the bytes are valid UTF-8, [`TemplateSource::Binary`] otherwise.
    fn from(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Self::Owned(text),
            Err(e) => Self::Binary(e.into_bytes()),
        }
    }
}

impl TemplateSource {
    /// Renderable text, `None` for binary assets.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Static(s) => Some(s),
            Self::Owned(s) => Some(s),
            Self::Binary(_) => None,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Static(s) => s.as_bytes(),
            Self::Owned(s) => s.as_bytes(),
            Self::Binary(b) => b,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Binary(_))
    }
}

// ============================================================================
// Entries & Renames
// ============================================================================

/// One file in a blueprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlueprintEntry {
    /// Where the file lives inside the blueprint. Key for the rename table.
    pub source: RelativePath,

    /// Output path template. May contain `__name__` and `{{VAR}}` tokens.
    pub destination: String,

    pub category: FileCategory,

    pub content: TemplateSource,
}

impl BlueprintEntry {
    /// Entry whose destination template equals its source path.
    pub fn new(
        source: RelativePath,
        category: FileCategory,
        content: impl Into<TemplateSource>,
    ) -> Self {
        Self {
            destination: source.as_str().to_string(),
            source,
            category,
            content: content.into(),
        }
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = destination.into();
        self
    }
}

/// Static source → destination mapping.
///
/// Used for files that cannot ship under their final name, e.g. `gitignore`
/// which package managers strip when it is called `.gitignore`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameTable(BTreeMap<RelativePath, String>);

impl RenameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: RelativePath, destination: impl Into<String>) {
        self.0.insert(source, destination.into());
    }

    pub fn get(&self, source: &RelativePath) -> Option<&str> {
        self.0.get(source).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RelativePath, &str)> {
        self.0.iter().map(|(k, v)| (k, v.as_str()))
    }
}

// ============================================================================
// Metadata
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlueprintMetadata {
    pub name: String,
    pub description: String,
    pub version: String,

    /// Dependency install command run after generation, e.g. `["npm", "install"]`.
    pub install_command: Option<Vec<String>>,
}

impl BlueprintMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            version: "0.1.0".to_string(),
            install_command: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn install_command<I, S>(mut self, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.install_command = Some(command.into_iter().map(Into::into).collect());
        self
    }
}

// ============================================================================
// Blueprint Aggregate
// ============================================================================

/// A named project template.
///
/// ## Invariants (enforced by `validate()`)
///
/// 1. `metadata.name` is non-empty
/// 2. at least one entry
/// 3. entry sources are unique
/// 4. every rename key names an existing entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blueprint {
    pub metadata: BlueprintMetadata,
    pub entries: Vec<BlueprintEntry>,
    pub renames: RenameTable,
}

impl Blueprint {
    pub fn builder() -> BlueprintBuilder {
        BlueprintBuilder::default()
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Destination template for `entry`, with the rename table applied.
    pub fn destination_for<'a>(&'a self, entry: &'a BlueprintEntry) -> &'a str {
        self.renames
            .get(&entry.source)
            .unwrap_or(entry.destination.as_str())
    }

    pub fn entries_in(&self, category: FileCategory) -> impl Iterator<Item = &BlueprintEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.metadata.name.trim().is_empty() {
            return Err(DomainError::InvalidBlueprint(
                "Blueprint name cannot be empty".into(),
            ));
        }

        if self.entries.is_empty() {
            return Err(DomainError::EmptyBlueprint {
                name: self.metadata.name.clone(),
            });
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !seen.insert(&entry.source) {
                return Err(DomainError::DuplicatePath {
                    path: entry.source.to_string(),
                });
            }
        }

        for (source, _) in self.renames.iter() {
            if !seen.contains(source) {
                return Err(DomainError::InvalidBlueprint(format!(
                    "rename refers to unknown entry '{source}'"
                )));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Builder
// ============================================================================

#[derive(Debug, Default)]
pub struct BlueprintBuilder {
    metadata: Option<BlueprintMetadata>,
    entries: Vec<BlueprintEntry>,
    renames: RenameTable,
}

impl BlueprintBuilder {
    pub fn metadata(mut self, metadata: BlueprintMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn entry(mut self, entry: BlueprintEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn core(self, path: &str, content: impl Into<TemplateSource>) -> Self {
        self.file(path, FileCategory::Core, content)
    }

    pub fn file(
        self,
        path: &str,
        category: FileCategory,
        content: impl Into<TemplateSource>,
    ) -> Self {
        self.entry(BlueprintEntry::new(RelativePath::new(path), category, content))
    }

    pub fn rename(mut self, source: &str, destination: impl Into<String>) -> Self {
        self.renames.insert(RelativePath::new(source), destination);
        self
    }

    /// Consume builder and construct a validated `Blueprint`.
    ///
    /// # Errors
    ///
    /// - `MissingRequiredField` if metadata is not set
    /// - anything `Blueprint::validate` rejects
    pub fn build(self) -> Result<Blueprint, DomainError> {
        let blueprint = Blueprint {
            metadata: self
                .metadata
                .ok_or(DomainError::MissingRequiredField { field: "metadata" })?,
            entries: self.entries,
            renames: self.renames,
        };

        blueprint.validate()?;
        Ok(blueprint)
    }
}
