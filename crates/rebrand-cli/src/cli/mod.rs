//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use rebrand_core::domain::DecodePolicy;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "rebrand",
    bin_name = "rebrand",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Rename an identifier across a whole directory tree",
    long_about = "Rebrand replaces a term (and its Capitalized and UPPERCASE forms) \
                  in file contents, file names and directory names, skipping \
                  VCS metadata and build outputs.",
    after_help = "EXAMPLES:\n\
        \x20 rebrand run --from maestro --to artifex --dry-run\n\
        \x20 rebrand run ./services/api --from maestro --to artifex --yes\n\
        \x20 rebrand init\n\
        \x20 rebrand completions bash > /usr/share/bash-completion/completions/rebrand",
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
    /// Rename a term throughout a directory tree.
    #[command(
        visible_alias = "r",
        about = "Rename a term throughout a tree",
        after_help = "EXAMPLES:\n\
            \x20 rebrand run --from maestro --to artifex            # current directory\n\
            \x20 rebrand run ../other --from api --to gateway --dry-run\n\
            \x20 rebrand run --exclude-dir dist --extension vue --yes"
    )]
    Run(RunArgs),

    /// Initialise a Rebrand configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 rebrand init            # ./.rebrand.toml\n\
            \x20 rebrand init --global   # per-user config\n\
            \x20 rebrand init --force    # overwrite"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 rebrand completions bash > ~/.local/share/bash-completion/completions/rebrand\n\
            \x20 rebrand completions zsh  > ~/.zfunc/_rebrand\n\
            \x20 rebrand completions fish > ~/.config/fish/completions/rebrand.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 rebrand config get rename.from\n\
            \x20 rebrand config list\n\
            \x20 rebrand config path"
    )]
    Config(ConfigCommands),
}

// ── run ───────────────────────────────────────────────────────────────────────

/// Arguments for `rebrand run`.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Directory to rewrite in place.
    #[arg(
        value_name = "ROOT",
        default_value = ".",
        help = "Root of the tree to rename (default: current directory)"
    )]
    pub root: PathBuf,

    /// Term to replace. Overrides `rename.from` from configuration.
    #[arg(short = 'f', long = "from", value_name = "TERM", help = "Term to replace")]
    pub from: Option<String>,

    /// Replacement term. Overrides `rename.to` from configuration.
    #[arg(short = 't', long = "to", value_name = "TERM", help = "Replacement term")]
    pub to: Option<String>,

    /// Report what would change without touching the tree.
    #[arg(long = "dry-run", help = "Show what would change without changing it")]
    pub dry_run: bool,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation and apply immediately")]
    pub yes: bool,

    /// What to do with files that are not valid UTF-8.
    #[arg(
        long = "on-decode-error",
        value_name = "POLICY",
        value_enum,
        help = "Handling of non-UTF-8 files"
    )]
    pub on_decode_error: Option<DecodeErrorArg>,

    /// Extra directory name to skip (repeatable).
    #[arg(
        long = "exclude-dir",
        value_name = "NAME",
        action = clap::ArgAction::Append,
        help = "Additional directory name to exclude"
    )]
    pub exclude_dirs: Vec<String>,

    /// Extra file name to skip (repeatable).
    #[arg(
        long = "exclude-file",
        value_name = "NAME",
        action = clap::ArgAction::Append,
        help = "Additional file name to exclude"
    )]
    pub exclude_files: Vec<String>,

    /// Extra extension eligible for content rewriting (repeatable).
    #[arg(
        short = 'e',
        long = "extension",
        value_name = "EXT",
        action = clap::ArgAction::Append,
        help = "Additional file extension to rewrite (e.g. vue or .vue)"
    )]
    pub extensions: Vec<String>,
}

/// `--on-decode-error` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DecodeErrorArg {
    /// Leave the file untouched and report it.
    Skip,
    /// Drop undecodable bytes and rewrite anyway.
    #[value(alias = "best-effort")]
    Lossy,
    /// Record a failure for the file.
    #[value(alias = "strict")]
    Fail,
}

impl From<DecodeErrorArg> for DecodePolicy {
    fn from(arg: DecodeErrorArg) -> Self {
        match arg {
            DecodeErrorArg::Skip => Self::Skip,
            DecodeErrorArg::Lossy => Self::Lossy,
            DecodeErrorArg::Fail => Self::Fail,
        }
    }
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `rebrand init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to the per-user config location instead of `./.rebrand.toml`.
    #[arg(long = "global", help = "Create per-user configuration")]
    pub global: bool,

    /// Overwrite an existing config file.
    #[arg(long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `rebrand completions`.
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

/// Subcommands for `rebrand config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `rename.from`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
