//! Token substitution context for paths and file content.

use std::collections::HashMap;

use chrono::Datelike;

use crate::domain::naming::ProjectIdentity;

/// Path sentinel replaced by the package identity.
pub const NAME_SENTINEL: &str = "__name__";

/// Context for token substitution.
///
/// Two token forms are recognised:
///
/// | Token | Replaced with |
/// |-------|---------------|
/// | `__name__` | package identity (dasherized name) |
/// | `{{PROJECT_NAME}}` | raw name as typed |
/// | `{{PACKAGE_NAME}}` | package identity |
/// | `{{PROJECT_NAME_KEBAB}}` | package identity |
/// | `{{PROJECT_NAME_SNAKE}}` | `snake_case` name |
/// | `{{PROJECT_NAME_PASCAL}}` | `PascalCase` name |
/// | `{{YEAR}}` | current year |
///
/// Unknown `{{TOKENS}}` are left untouched.
#[derive(Debug, Clone)]
pub struct RenderContext {
    package_name: String,
    variables: HashMap<String, String>,
}

impl RenderContext {
    pub fn new(identity: &ProjectIdentity) -> Self {
        let package = identity.dasherized_name().to_string();
        let mut vars = HashMap::new();

        vars.insert("PROJECT_NAME".to_string(), identity.raw_name().to_string());
        vars.insert("PACKAGE_NAME".to_string(), package.clone());
        vars.insert("PROJECT_NAME_KEBAB".to_string(), package.clone());
        vars.insert("PROJECT_NAME_SNAKE".to_string(), identity.snake_name());
        vars.insert("PROJECT_NAME_PASCAL".to_string(), identity.pascal_name());
        vars.insert(
            "YEAR".to_string(),
            chrono::Local::now().year().to_string(),
        );

        Self {
            package_name: package,
            variables: vars,
        }
    }

    /// Add or override a variable.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Replace every known token in `template`.
    pub fn render(&self, template: &str) -> String {
        let mut result = template.replace(NAME_SENTINEL, &self.package_name);

        for (key, value) in &self.variables {
            let placeholder = format!("{{{{{key}}}}}");
            result = result.replace(&placeholder, value);
        }

        result
    }
}
