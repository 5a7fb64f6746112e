//! Implementation of the `trellis new` command.
//!
//! Responsibility: translate CLI arguments into `GenerationOptions`, call the
//! core scaffold service, run the post-generation steps and display results.
//! Naming, directory and conflict rules all live in `trellis-core`.

use std::fmt;
use std::io::IsTerminal as _;
use std::path::Path;
use std::process::Command;

use tracing::{info, instrument};

use trellis_adapters::{JsonManifestWriter, LocalFilesystem, SimpleRenderer};
use trellis_core::{
    application::{GenerationRequest, NestedProjectGuard, ScaffoldService},
    domain::{GenerationOptions, GenerationResult},
};

use crate::{
    cli::{GlobalArgs, NewArgs},
    commands::blueprint_store,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `trellis new` command.
///
/// 1. Merge flags with config defaults into `GenerationOptions`
/// 2. Ask before generating into a non-empty directory (interactive only)
/// 3. Generate through `ScaffoldService`
/// 4. Report the file list
/// 5. `git init` and the blueprint's install command, unless skipped
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let cwd = std::env::current_dir().with_cli_context(|| "failed to read the current directory")?;
    let blueprint = args
        .blueprint
        .clone()
        .unwrap_or_else(|| config.defaults.blueprint.clone());

    let options = build_options(&args, config);
    let options = confirm_non_empty_target(&args, options, &cwd, global, output)?;

    let service = ScaffoldService::new(
        blueprint_store(config)?,
        Box::new(SimpleRenderer::new()),
        Box::new(LocalFilesystem::new()),
    )
    .with_manifest_writer(Box::new(JsonManifestWriter::new()));

    info!(blueprint = %blueprint, dry_run = options.dry_run(), "Generation started");
    let request = GenerationRequest::new(args.name.as_str(), blueprint, &cwd)
        .with_options(options.clone());
    let result = service.generate(request)?;

    report(&result, output)?;

    let steps = post_generation_steps(&options, result.install_command.as_deref());
    for step in &steps {
        run_step(step, &result.target_directory, output)?;
    }

    if !result.dry_run && !global.quiet && !output.is_json() {
        let shown = result
            .target_directory
            .strip_prefix(&cwd)
            .unwrap_or(&result.target_directory);
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", shown.display()))?;
    }

    Ok(())
}

// ── Options ───────────────────────────────────────────────────────────────────

/// Flags win; `defaults.skip_git` / `defaults.skip_install` can only turn a
/// step off.
fn build_options(args: &NewArgs, config: &AppConfig) -> GenerationOptions {
    let mut options = GenerationOptions::new()
        .with_dry_run(args.dry_run)
        .with_skip_install(args.skip_install || config.defaults.skip_install)
        .with_skip_git(args.skip_git || config.defaults.skip_git)
        .with_inline_template(args.inline_template)
        .with_inline_style(args.inline_style)
        .with_skip_tests(args.skip_tests)
        .with_force(args.force);

    if let Some(dir) = &args.directory {
        options = options.with_directory(dir);
    }
    options
}

// ── Confirmation ──────────────────────────────────────────────────────────────

/// Whether to ask before generating into a non-empty target. Never asks when
/// the answer could not be read or is already implied by the flags.
#[cfg_attr(not(feature = "interactive"), allow(dead_code))]
fn should_prompt(
    args: &NewArgs,
    options: &GenerationOptions,
    global: &GlobalArgs,
    output: &OutputManager,
) -> bool {
    !(args.yes
        || options.force()
        || options.dry_run()
        || global.quiet
        || output.is_json()
        || !std::io::stdin().is_terminal())
}

#[cfg_attr(not(feature = "interactive"), allow(dead_code))]
fn is_non_empty_dir(path: &Path) -> bool {
    std::fs::read_dir(path)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

/// A non-empty target that `force` would unlock. Targets inside or holding a
/// generated project fail regardless.
#[cfg_attr(not(feature = "interactive"), allow(dead_code))]
fn is_overridable_target(target: &Path, cwd: &Path) -> bool {
    let fs = LocalFilesystem::new();
    let guard = NestedProjectGuard::default();
    let inside_project = guard.check(&fs, cwd).is_err()
        || target
            .parent()
            .is_some_and(|parent| guard.check(&fs, parent).is_err())
        || guard.is_project_root(&fs, target);

    !inside_project && is_non_empty_dir(target)
}

#[cfg(feature = "interactive")]
fn confirm_non_empty_target(
    args: &NewArgs,
    options: GenerationOptions,
    cwd: &Path,
    global: &GlobalArgs,
    output: &OutputManager,
) -> CliResult<GenerationOptions> {
    use trellis_core::domain::{DirectoryResolver, NameValidator};

    if !should_prompt(args, &options, global, output) {
        return Ok(options);
    }
    // Invalid names are reported by the engine.
    let Ok(identity) = NameValidator::validate(&args.name) else {
        return Ok(options);
    };
    let target = DirectoryResolver::resolve(&identity, &options, cwd).target_directory;
    if !is_overridable_target(&target, cwd) {
        return Ok(options);
    }

    let confirmed = dialoguer::Confirm::new()
        .with_prompt(format!(
            "{} is not empty. Generate into it anyway?",
            target.display()
        ))
        .default(false)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation".into(),
            source: std::io::Error::other(e.to_string()),
        })?;

    if !confirmed {
        return Err(CliError::Cancelled);
    }
    tracing::debug!(path = %target.display(), "User confirmed non-empty target");
    Ok(options.with_force(true))
}

/// Without a prompt, a non-empty target fails with `target-exists`.
#[cfg(not(feature = "interactive"))]
fn confirm_non_empty_target(
    _args: &NewArgs,
    options: GenerationOptions,
    _cwd: &Path,
    _global: &GlobalArgs,
    _output: &OutputManager,
) -> CliResult<GenerationOptions> {
    Ok(options)
}

// ── Reporting ─────────────────────────────────────────────────────────────────

fn report(result: &GenerationResult, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        return output.json(result);
    }

    if result.dry_run {
        output.header(&format!(
            "Dry run: '{}' from blueprint '{}' (nothing written)",
            result.package_identity, result.blueprint
        ))?;
    } else {
        output.header(&format!(
            "Generating '{}' from blueprint '{}'",
            result.package_identity, result.blueprint
        ))?;
    }

    for file in result.relative_files() {
        output.file_action(&file.display().to_string(), result.dry_run)?;
    }

    let summary = format!(
        "{} files for '{}' in {}",
        result.file_count(),
        result.package_identity,
        result.target_directory.display()
    );
    if result.dry_run {
        output.info(&format!("Would write {summary}"))?;
    } else {
        output.success(&format!("Wrote {summary}"))?;
    }
    Ok(())
}

// ── Post-generation steps ─────────────────────────────────────────────────────

/// One external command run inside the new project.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ExternalStep {
    label: &'static str,
    program: String,
    args: Vec<String>,
}

impl ExternalStep {
    fn new(label: &'static str, program: &str, args: &[&str]) -> Self {
        Self {
            label,
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl fmt::Display for ExternalStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Steps to run after a successful real run, in order. Empty for dry runs.
fn post_generation_steps(
    options: &GenerationOptions,
    install_command: Option<&[String]>,
) -> Vec<ExternalStep> {
    if options.dry_run() {
        return Vec::new();
    }

    let mut steps = Vec::new();
    if !options.skip_git() {
        steps.push(ExternalStep::new("Initialising git repository", "git", &["init", "-q"]));
        steps.push(ExternalStep::new("Staging files", "git", &["add", "-A"]));
        steps.push(ExternalStep::new(
            "Creating initial commit",
            "git",
            &["commit", "-q", "-m", "Initial commit"],
        ));
    }

    if !options.skip_install() {
        if let Some((program, args)) = install_command.and_then(|c| c.split_first()) {
            steps.push(ExternalStep {
                label: "Installing dependencies",
                program: program.clone(),
                args: args.to_vec(),
            });
        }
    }
    steps
}

#[instrument(skip(output), fields(command = %step))]
fn run_step(step: &ExternalStep, dir: &Path, output: &OutputManager) -> CliResult<()> {
    let spinner = output.spinner(format!("{}...", step.label));
    let result = Command::new(&step.program)
        .args(&step.args)
        .current_dir(dir)
        .output();
    spinner.finish_and_clear();

    let out = result.map_err(|e| CliError::ExternalCommandFailed {
        command: step.to_string(),
        detail: e.to_string(),
    })?;

    if !out.status.success() {
        let stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();
        return Err(CliError::ExternalCommandFailed {
            command: step.to_string(),
            detail: if stderr.is_empty() {
                out.status.to_string()
            } else {
                stderr
            },
        });
    }

    info!("Post-generation step finished");
    output.success(step.label)?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::cli::OutputFormat;

    fn args(name: &str) -> NewArgs {
        NewArgs {
            name: name.into(),
            blueprint: None,
            directory: None,
            dry_run: false,
            skip_install: false,
            skip_git: false,
            inline_template: false,
            inline_style: false,
            skip_tests: false,
            force: false,
            yes: false,
        }
    }

    fn plain_output() -> (GlobalArgs, OutputManager) {
        let global = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: true,
            config: None,
            output_format: OutputFormat::Plain,
        };
        let output = OutputManager::new(&global, &AppConfig::default());
        (global, output)
    }

    fn npm_install() -> Vec<String> {
        vec!["npm".into(), "install".into()]
    }

    // ── build_options ─────────────────────────────────────────────────────

    #[test]
    fn flags_map_onto_options() {
        let mut a = args("foo");
        a.directory = Some(PathBuf::from("bar"));
        a.inline_style = true;
        a.skip_tests = true;
        a.force = true;

        let options = build_options(&a, &AppConfig::default());
        assert_eq!(options.directory(), Some(Path::new("bar")));
        assert!(options.inline_style() && options.skip_tests() && options.force());
        assert!(!options.inline_template() && !options.dry_run());
    }

    #[test]
    fn config_defaults_can_skip_steps() {
        let mut config = AppConfig::default();
        config.defaults.skip_git = true;
        let options = build_options(&args("foo"), &config);
        assert!(options.skip_git());
        assert!(!options.skip_install());
    }

    // ── post_generation_steps ─────────────────────────────────────────────

    #[test]
    fn dry_run_runs_nothing() {
        let options = GenerationOptions::new().with_dry_run(true);
        let install = npm_install();
        assert!(post_generation_steps(&options, Some(install.as_slice())).is_empty());
    }

    #[test]
    fn default_runs_git_then_install() {
        let install = npm_install();
        let steps = post_generation_steps(&GenerationOptions::new(), Some(install.as_slice()));
        let rendered: Vec<String> = steps.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "git init -q",
                "git add -A",
                "git commit -q -m Initial commit",
                "npm install",
            ]
        );
    }

    #[test]
    fn skip_flags_drop_their_steps() {
        let install = npm_install();
        let no_git = GenerationOptions::new().with_skip_git(true);
        let steps = post_generation_steps(&no_git, Some(install.as_slice()));
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].program, "npm");

        let no_install = GenerationOptions::new().with_skip_install(true);
        let steps = post_generation_steps(&no_install, Some(install.as_slice()));
        assert!(steps.iter().all(|s| s.program == "git"));
    }

    #[test]
    fn blueprint_without_install_command_only_runs_git() {
        let steps = post_generation_steps(&GenerationOptions::new(), None);
        assert_eq!(steps.len(), 3);

        let empty: Vec<String> = Vec::new();
        let steps = post_generation_steps(&GenerationOptions::new(), Some(empty.as_slice()));
        assert_eq!(steps.len(), 3);
    }

    // ── run_step ──────────────────────────────────────────────────────────

    #[test]
    fn missing_program_is_external_command_failure() {
        let (_, output) = plain_output();
        let temp = tempfile::TempDir::new().unwrap();
        let step = ExternalStep::new("Nothing", "trellis-no-such-program-xyz", &["--flag"]);

        let err = run_step(&step, temp.path(), &output).unwrap_err();
        assert!(matches!(
            err,
            CliError::ExternalCommandFailed { ref command, .. }
                if command == "trellis-no-such-program-xyz --flag"
        ));
        assert_eq!(err.exit_code(), 1);
    }

    // ── confirmation ──────────────────────────────────────────────────────

    #[test]
    fn never_prompts_with_yes_force_or_dry_run() {
        let (global, output) = plain_output();
        let mut a = args("foo");
        a.yes = true;
        assert!(!should_prompt(&a, &GenerationOptions::new(), &global, &output));

        let a = args("foo");
        let forced = GenerationOptions::new().with_force(true);
        assert!(!should_prompt(&a, &forced, &global, &output));
        let dry = GenerationOptions::new().with_dry_run(true);
        assert!(!should_prompt(&a, &dry, &global, &output));
    }

    #[test]
    fn non_empty_dir_detection() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(!is_non_empty_dir(temp.path()));
        assert!(!is_non_empty_dir(&temp.path().join("absent")));
        std::fs::write(temp.path().join("file"), "x").unwrap();
        assert!(is_non_empty_dir(temp.path()));
    }

    #[test]
    fn project_targets_are_not_overridable() {
        let temp = tempfile::TempDir::new().unwrap();
        let plain = temp.path().join("plain");
        std::fs::create_dir(&plain).unwrap();
        std::fs::write(plain.join("notes.txt"), "x").unwrap();
        assert!(is_overridable_target(&plain, temp.path()));

        let project = temp.path().join("project");
        std::fs::create_dir(&project).unwrap();
        std::fs::write(project.join(".trellis.json"), "{}").unwrap();
        assert!(!is_overridable_target(&project, temp.path()));

        let inside = project.join("sub");
        std::fs::create_dir(&inside).unwrap();
        std::fs::write(inside.join("notes.txt"), "x").unwrap();
        assert!(!is_overridable_target(&inside, temp.path()));
        assert!(!is_overridable_target(&plain, &project));
    }
}
