//! Project name validation and identity derivation.
//!
//! A raw project name is the only user-supplied string that reaches the
//! filesystem, so it is gated here before any other component sees it.
//!
//! ## Rules
//!
//! | Input        | Result                               |
//! |--------------|--------------------------------------|
//! | `""`         | rejected: `empty`                    |
//! | `"!"`        | rejected: `illegal-character`        |
//! | `"abc-."`    | rejected: `illegal-character`        |
//! | `"abc-"`     | rejected: `trailing-hyphen`          |
//! | `"abc-def"`  | accepted, dasherized `abc-def`       |
//! | `"FooApp"`   | accepted, dasherized `foo-app`       |

use serde::Serialize;

use crate::domain::error::{DomainError, InvalidNameReason};

/// The validated identity of the project being generated.
///
/// Only constructed through [`NameValidator::validate`], so holding one is
/// proof the name passed every rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectIdentity {
    raw_name: String,
    dasherized_name: String,
}

impl ProjectIdentity {
    /// Name exactly as the user typed it. Default directory name.
    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    /// Lowercase, hyphen-separated form used as the package identifier.
    pub fn dasherized_name(&self) -> &str {
        &self.dasherized_name
    }

    /// `snake_case` form, for identifiers in generated source.
    pub fn snake_name(&self) -> String {
        to_snake_case(&self.raw_name)
    }

    /// `PascalCase` form, for type names in generated source.
    pub fn pascal_name(&self) -> String {
        to_pascal_case(&self.raw_name)
    }
}

/// Pure gate for raw project names.
pub struct NameValidator;

impl NameValidator {
    /// Validate `raw` and derive its identity.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidName`] carrying the first rule that failed.
    pub fn validate(raw: &str) -> Result<ProjectIdentity, DomainError> {
        let reject = |reason| DomainError::InvalidName {
            name: raw.to_string(),
            reason,
        };

        if raw.is_empty() {
            return Err(reject(InvalidNameReason::Empty));
        }

        if !raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(reject(InvalidNameReason::IllegalCharacter));
        }

        if raw.ends_with('-') {
            return Err(reject(InvalidNameReason::TrailingHyphen));
        }

        Ok(ProjectIdentity {
            raw_name: raw.to_string(),
            dasherized_name: dasherize(raw),
        })
    }
}

// ============================================================================
// Case Conversion
// ============================================================================

/// Convert an identifier to lowercase, hyphen-separated form.
///
/// Idempotent: `dasherize(&dasherize(x)) == dasherize(x)`.
///
/// | Input | Output |
/// |-------|--------|
/// | "FooApp" | "foo-app" |
/// | "fooBar2Baz" | "foo-bar2-baz" |
/// | "HTTPServer" | "http-server" |
/// | "my_app" | "my-app" |
pub fn dasherize(s: &str) -> String {
    split_words(s).join("-")
}

/// Convert an identifier to `snake_case`.
pub fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// Convert an identifier to `PascalCase`.
pub fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    let mut out = String::new();
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                    out
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Split a string into lowercase words.
///
/// Boundaries:
/// 1. `_`, `-` and whitespace always split (and are dropped)
/// 2. lower/digit followed by upper: `fooBar` → `foo` + `bar`
/// 3. acronym end: `HTTPServer` → `http` + `server`
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(&next) = chars.peek() {
            if (c.is_lowercase() || c.is_ascii_digit()) && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason_for(raw: &str) -> InvalidNameReason {
        match NameValidator::validate(raw) {
            Err(DomainError::InvalidName { reason, .. }) => reason,
            other => panic!("expected InvalidName for {raw:?}, got {other:?}"),
        }
    }

    #[test]
    fn accepts_plain_and_hyphenated_names() {
        for name in ["abc", "abc-def", "abc-123", "FooApp", "a", "x1-y2-z3"] {
            assert!(NameValidator::validate(name).is_ok(), "rejected {name}");
        }
    }

    #[test]
    fn rejects_empty_name() {
        assert_eq!(reason_for(""), InvalidNameReason::Empty);
    }

    #[test]
    fn rejects_illegal_characters() {
        for name in ["!", "abc-.", "a.b", "my app", "my_app", "é"] {
            assert_eq!(
                reason_for(name),
                InvalidNameReason::IllegalCharacter,
                "for {name:?}"
            );
        }
    }

    #[test]
    fn rejects_trailing_hyphen() {
        assert_eq!(reason_for("abc-"), InvalidNameReason::TrailingHyphen);
        assert_eq!(reason_for("abc-def-"), InvalidNameReason::TrailingHyphen);
        assert_eq!(reason_for("-"), InvalidNameReason::TrailingHyphen);
    }

    #[test]
    fn illegal_character_wins_over_trailing_hyphen() {
        // "abc-." ends with '.', but "ab.-" ends with '-' and still has '.'
        assert_eq!(reason_for("ab.-"), InvalidNameReason::IllegalCharacter);
    }

    #[test]
    fn identity_keeps_raw_and_dasherized_forms() {
        let id = NameValidator::validate("FooApp").unwrap();
        assert_eq!(id.raw_name(), "FooApp");
        assert_eq!(id.dasherized_name(), "foo-app");
        assert_eq!(id.snake_name(), "foo_app");
        assert_eq!(id.pascal_name(), "FooApp");
    }

    #[test]
    fn dasherize_examples() {
        assert_eq!(dasherize("FooApp"), "foo-app");
        assert_eq!(dasherize("foo"), "foo");
        assert_eq!(dasherize("abc-123"), "abc-123");
        assert_eq!(dasherize("fooBar2Baz"), "foo-bar2-baz");
        assert_eq!(dasherize("HTTPServer"), "http-server");
        assert_eq!(dasherize("my_app"), "my-app");
        assert_eq!(dasherize("a--b"), "a-b");
    }

    #[test]
    fn dasherize_is_idempotent() {
        for input in [
            "FooApp",
            "fooBarBaz",
            "HTTPServer",
            "XMLHttpRequest",
            "abc-def",
            "Abc-Def-123",
            "a1B2c3",
            "x",
        ] {
            let once = dasherize(input);
            assert_eq!(dasherize(&once), once, "not idempotent for {input}");
        }
    }

    #[test]
    fn validation_is_deterministic() {
        assert_eq!(
            NameValidator::validate("FooApp"),
            NameValidator::validate("FooApp")
        );
        assert_eq!(
            NameValidator::validate("abc-"),
            NameValidator::validate("abc-")
        );
    }

    #[test]
    fn pascal_case_from_hyphenated() {
        assert_eq!(to_pascal_case("my-app"), "MyApp");
        assert_eq!(to_snake_case("MyApp"), "my_app");
    }
}
