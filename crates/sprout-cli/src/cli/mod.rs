//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
///
/// Without a subcommand, `sprout` creates a project; the creation flags live
/// at the top level so that `sprout my-app --template=owner/repo` works.
/// Subcommand names win over `NAME`; creation flags given together with a
/// subcommand are rejected in `main::run`.
#[derive(Debug, Parser)]
#[command(
    name    = "sprout",
    bin_name = "sprout",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f331} Create a new app from a GitHub template",
    long_about = "Sprout downloads the latest release of a template repository, \
                  unpacks it under your project name, copies its git metadata, \
                  installs dependencies, and makes the first commit.",
    after_help = "EXAMPLES:\n\
        \x20 sprout my-app\n\
        \x20 sprout my-app --template=owner/repo\n\
        \x20 sprout my-app --dry-run\n\
        \x20 sprout completions bash > /usr/share/bash-completion/completions/sprout",
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Project creation arguments (used when no subcommand is given).
    #[command(flatten)]
    pub create: CreateArgs,

    /// Optional subcommand.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialise a Sprout configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 sprout init          # default location\n\
            \x20 sprout init --force  # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 sprout completions bash > ~/.local/share/bash-completion/completions/sprout\n\
            \x20 sprout completions zsh  > ~/.zfunc/_sprout\n\
            \x20 sprout completions fish > ~/.config/fish/completions/sprout.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Sprout configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 sprout config get template.default\n\
            \x20 sprout config list\n\
            \x20 sprout config path"
    )]
    Config(ConfigCommands),
}

// ── create ────────────────────────────────────────────────────────────────────

/// Arguments for creating a project.
#[derive(Debug, Args, Default, PartialEq, Eq)]
pub struct CreateArgs {
    /// Project directory name.  Defaults to `master` when omitted.
    #[arg(value_name = "NAME", help = "Project directory name")]
    pub name: Option<String>,

    /// Template repository to scaffold from.
    #[arg(
        short = 't',
        long = "template",
        value_name = "OWNER/REPO",
        help = "Template repository (default: alreadyExisted/das-react-template)"
    )]
    pub template: Option<String>,

    /// Resolve the version and print the plan without downloading anything.
    #[arg(long = "dry-run", help = "Show what would be done without doing it")]
    pub dry_run: bool,

    /// Do not fetch `.gitignore` / `.gitattributes` from the raw source tree.
    #[arg(long = "skip-metadata", help = "Skip copying .gitignore/.gitattributes")]
    pub skip_metadata: bool,

    /// Stop after extraction: no git, no package manager.
    #[arg(long = "skip-install", help = "Skip git init and dependency install")]
    pub skip_install: bool,

    /// Initialise git and install, but do not stage or commit.
    #[arg(
        long = "no-commit",
        conflicts_with = "skip_install",
        help = "Skip the initial commit"
    )]
    pub no_commit: bool,

    /// Commit message for the initial commit.
    #[arg(
        short = 'm',
        long = "message",
        value_name = "MSG",
        conflicts_with_all = ["no_commit", "skip_install"],
        help = "Initial commit message"
    )]
    pub message: Option<String>,
}

impl CreateArgs {
    /// `true` when no creation argument was given.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `sprout init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `sprout completions`.
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

/// Subcommands for `sprout config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `sources.api_base`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}
