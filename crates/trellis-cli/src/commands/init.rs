//! `trellis init`: create a default configuration file.

use std::path::Path;

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Write the built-in defaults to `--config` or the platform config path.
pub fn execute(args: InitArgs, global: &GlobalArgs, output: &OutputManager) -> CliResult<()> {
    let config_path = global.config.clone().unwrap_or_else(AppConfig::config_path);
    write_default_config(&config_path, args.force, output)
}

fn write_default_config(path: &Path, force: bool, output: &OutputManager) -> CliResult<()> {
    if path.exists() && !force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display(),
        ))?;
        return Ok(());
    }

    let toml = AppConfig::default()
        .to_toml()
        .map_err(|e| CliError::ConfigError {
            message: format!("{e:#}"),
            source: Some(e.into()),
        })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(path, toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))?;

    tracing::info!(path = %path.display(), "Configuration written");
    output.success(&format!("Configuration created at {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn quiet_output() -> OutputManager {
        let global = GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color: true,
            config: None,
            output_format: OutputFormat::Plain,
        };
        OutputManager::new(&global, &AppConfig::default())
    }

    #[test]
    fn writes_loadable_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("nested/config.toml");

        write_default_config(&path, false, &quiet_output()).unwrap();

        let loaded = AppConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(loaded.defaults, AppConfig::default().defaults);
    }

    #[test]
    fn existing_file_is_kept_without_force() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        write_default_config(&path, false, &quiet_output()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        write_default_config(&path, true, &quiet_output()).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[defaults]"));
    }
}
