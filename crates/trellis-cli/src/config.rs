//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by reference. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `TRELLIS__SECTION__KEY` environment variables (`.env` honoured)
//! 3. Config file (`--config`, else the platform config directory)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Prefix for environment overrides, e.g. `TRELLIS__DEFAULTS__SKIP_GIT=true`.
pub const ENV_PREFIX: &str = "TRELLIS";

const ENV_SEPARATOR: &str = "__";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Where user blueprints live.
    pub blueprints: BlueprintsConfig,
    /// Optional log file.
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub blueprint: String,
    pub skip_git: bool,
    pub skip_install: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            blueprint: trellis_adapters::builtin_blueprints::DEFAULT_BLUEPRINT.into(),
            skip_git: false,
            skip_install: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`. Used when `--output-format` is `auto`.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlueprintsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration layered over the built-in defaults.
    ///
    /// `config_file` is the path passed via `--config`; `None` uses
    /// [`Self::config_path`]. A missing file is not an error so that
    /// `trellis init` can create it.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let path = config_file
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path);
        debug!(path = %path.display(), exists = path.is_file(), "Loading configuration");

        Config::builder()
            .add_source(File::from(path.as_path()).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?
            .try_deserialize()
            .context("configuration has invalid values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.trellis.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "trellis", "trellis")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".trellis.toml"))
    }

    /// Look up a dotted key such as `defaults.blueprint`.
    ///
    /// Returns `None` for unknown keys. Unset optional values yield an empty
    /// string.
    pub fn get(&self, key: &str) -> Option<String> {
        let tree = serde_json::to_value(self).ok()?;
        let pointer = format!("/{}", key.replace('.', "/"));
        let value = match tree.pointer(&pointer) {
            Some(value) => value.clone(),
            // Unset optionals are skipped on serialisation.
            None if matches!(key, "blueprints.local_path" | "logging.file") => {
                serde_json::Value::Null
            }
            None => return None,
        };

        Some(match value {
            serde_json::Value::String(s) => s,
            serde_json::Value::Null => String::new(),
            serde_json::Value::Object(_) => return None,
            other => other.to_string(),
        })
    }

    /// Render as TOML, the on-disk format.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("failed to serialise configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_use_default_blueprint() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.blueprint, "default");
        assert!(!cfg.defaults.skip_git);
        assert!(!cfg.output.no_color);
        assert!(cfg.blueprints.local_path.is_none());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let cfg = AppConfig::load(Some(temp.path().join("absent.toml").as_path())).unwrap();
        assert_eq!(cfg.defaults.blueprint, "default");
    }

    #[test]
    fn file_values_override_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "[defaults]\nblueprint = \"library\"\nskip_git = true\n\n[blueprints]\nlocal_path = \"/opt/bp\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(cfg.defaults.blueprint, "library");
        assert!(cfg.defaults.skip_git);
        assert!(!cfg.defaults.skip_install);
        assert_eq!(cfg.blueprints.local_path, Some(PathBuf::from("/opt/bp")));
        assert_eq!(cfg.output.format, "auto");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[defaults\nblueprint = ").unwrap();
        assert!(AppConfig::load(Some(path.as_path())).is_err());
    }

    #[test]
    fn toml_round_trips_defaults() {
        let cfg = AppConfig::default();
        let text = cfg.to_toml().unwrap();
        assert!(text.contains("[defaults]"));
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn get_reads_dotted_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("defaults.blueprint").as_deref(), Some("default"));
        assert_eq!(cfg.get("output.no_color").as_deref(), Some("false"));
        assert_eq!(cfg.get("blueprints.local_path").as_deref(), Some(""));
    }

    #[test]
    fn get_rejects_unknown_and_section_keys() {
        let cfg = AppConfig::default();
        assert!(cfg.get("does.not.exist").is_none());
        assert!(cfg.get("defaults").is_none());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
