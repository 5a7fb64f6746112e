// ============================================================================
// domain/error.rs - DOMAIN ERROR TAXONOMY
// ============================================================================

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Why a project name was rejected.
///
/// Rules are checked in declaration order; the first failing rule wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidNameReason {
    /// The name was the empty string.
    Empty,
    /// The name contained a character outside `[a-zA-Z0-9-]`.
    IllegalCharacter,
    /// The name ended in `-`.
    TrailingHyphen,
}

impl InvalidNameReason {
    /// Stable reason code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::IllegalCharacter => "illegal-character",
            Self::TrailingHyphen => "trailing-hyphen",
        }
    }

    /// Human-readable explanation.
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Empty => "name cannot be empty",
            Self::IllegalCharacter => "only letters, digits and '-' are allowed",
            Self::TrailingHyphen => "name cannot end with '-'",
        }
    }
}

impl fmt::Display for InvalidNameReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (results are cached in tests and re-reported)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid project name '{name}': {reason}")]
    InvalidName {
        name: String,
        reason: InvalidNameReason,
    },

    #[error("Invalid blueprint: {0}")]
    InvalidBlueprint(String),

    #[error("Blueprint '{name}' has no entries")]
    EmptyBlueprint { name: String },

    #[error("Duplicate path in blueprint: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path escapes the project root: {path}")]
    PathEscapesRoot { path: String },

    // ========================================================================
    // Not Found Errors (404-level equivalent)
    // ========================================================================
    #[error("Unknown blueprint: {name}")]
    UnknownBlueprint { name: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidName { name, reason } => vec![
                format!("'{}' was rejected: {}", name, reason.describe()),
                "Use letters and digits, optionally separated by single hyphens".into(),
                "Examples: my-app, FooApp, service-2".into(),
            ],
            Self::UnknownBlueprint { name } => vec![
                format!("No blueprint is registered under '{}'", name),
                "Try: trellis list".into(),
                "Or point TRELLIS_BLUEPRINTS_DIR at a directory of blueprints".into(),
            ],
            Self::EmptyBlueprint { name } => vec![
                format!("Blueprint '{}' is corrupted", name),
                "Check its blueprint.toml and files/ directory".into(),
            ],
            Self::DuplicatePath { path } => vec![
                format!("Two entries resolve to '{}'", path),
                "Check the rename table for colliding destinations".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidName { .. } => ErrorCategory::Validation,
            Self::UnknownBlueprint { .. } => ErrorCategory::NotFound,
            Self::InvalidBlueprint(_)
            | Self::EmptyBlueprint { .. }
            | Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::PathEscapesRoot { .. } => ErrorCategory::Blueprint,
            Self::MissingRequiredField { .. } => ErrorCategory::Internal,
        }
    }

    /// Stable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidName { .. } => "invalid-name",
            Self::InvalidBlueprint(_) => "invalid-blueprint",
            Self::EmptyBlueprint { .. } => "empty-blueprint",
            Self::DuplicatePath { .. } => "duplicate-path",
            Self::AbsolutePathNotAllowed { .. } => "absolute-path",
            Self::PathEscapesRoot { .. } => "path-escapes-root",
            Self::UnknownBlueprint { .. } => "unknown-blueprint",
            Self::MissingRequiredField { .. } => "missing-field",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Blueprint,
    Internal,
}
