//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "trellis",
    bin_name = "trellis",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Blueprint-driven project scaffolding",
    long_about = "Trellis turns a project name and a blueprint into a ready-to-use \
                  directory tree, a package manifest and an optional git repository.",
    after_help = "EXAMPLES:\n\
        \x20 trellis new my-app\n\
        \x20 trellis new MyApp --directory apps/web --skip-tests\n\
        \x20 trellis new my-lib --blueprint library --dry-run\n\
        \x20 trellis list --format json\n\
        \x20 trellis completions bash > /usr/share/bash-completion/completions/trellis",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new project from a blueprint.
    #[command(
        visible_alias = "n",
        about = "Generate a new project",
        after_help = "EXAMPLES:\n\
            \x20 trellis new my-app\n\
            \x20 trellis new my-app --inline-template --inline-style\n\
            \x20 trellis new my-app --directory ./sandbox --dry-run"
    )]
    New(NewArgs),

    /// List registered blueprints.
    #[command(
        visible_alias = "ls",
        about = "List available blueprints",
        after_help = "EXAMPLES:\n\
            \x20 trellis list\n\
            \x20 trellis list --format list\n\
            \x20 trellis list --format json"
    )]
    List(ListArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 trellis init\n\
            \x20 trellis init --force\n\
            \x20 trellis --config ./trellis.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 trellis completions bash > ~/.local/share/bash-completion/completions/trellis\n\
            \x20 trellis completions zsh  > ~/.zfunc/_trellis\n\
            \x20 trellis completions fish > ~/.config/fish/completions/trellis.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the active configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 trellis config get defaults.blueprint\n\
            \x20 trellis config list\n\
            \x20 trellis config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `trellis new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name. Normalised to kebab-case for the package and the default
    /// directory (`FooApp` becomes `foo-app`).
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Blueprint to generate from.
    #[arg(
        short = 'b',
        long = "blueprint",
        value_name = "NAME",
        help = "Blueprint to use (default from config, else 'default')"
    )]
    pub blueprint: Option<String>,

    /// Generate into this directory instead of `./<name>`.
    #[arg(
        short = 'd',
        long = "directory",
        value_name = "DIR",
        help = "Target directory, relative to the current directory"
    )]
    pub directory: Option<PathBuf>,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    /// Do not run the blueprint's install command.
    #[arg(long = "skip-install", help = "Skip dependency installation")]
    pub skip_install: bool,

    /// Do not initialise a git repository.
    #[arg(long = "skip-git", help = "Skip git initialisation")]
    pub skip_git: bool,

    #[arg(long = "inline-template", help = "Omit separate template files")]
    pub inline_template: bool,

    #[arg(long = "inline-style", help = "Omit separate style files")]
    pub inline_style: bool,

    #[arg(long = "skip-tests", help = "Omit spec files")]
    pub skip_tests: bool,

    /// Generate into a non-empty directory. Never overrides a project marker.
    #[arg(long = "force", help = "Generate into a non-empty directory")]
    pub force: bool,

    /// Never prompt; conflicts fail instead.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation prompts")]
    pub yes: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `trellis list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `trellis init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `trellis completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `trellis config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.blueprint`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
