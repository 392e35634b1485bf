//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the `EngineConfig`
//! built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `REBRAND_<SECTION>__<KEY>`, e.g. `REBRAND_RENAME__FROM`
//! 3. Config file: `--config`, else `./.rebrand.toml`, else the per-user file
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use rebrand_core::domain::{
    DEFAULT_EXCLUDED_DIRS, DEFAULT_EXCLUDED_FILES, DEFAULT_EXTENSIONS, DecodePolicy,
};

/// File name of the per-project config, looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".rebrand.toml";

const ENV_PREFIX: &str = "REBRAND";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Terms and extra literal pairs.
    pub rename: RenameConfig,
    /// What the tree walk skips and what gets rewritten.
    pub scan: ScanConfig,
    /// Content rewriting settings.
    pub content: ContentConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Commands suggested after a successful run.
    pub follow_up: FollowUpConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Content-only literal substitutions, e.g. a namespace segment.
    pub extra_pairs: Vec<LiteralPair>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralPair {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub exclude_dirs: Vec<String>,
    pub exclude_files: Vec<String>,
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub on_decode_error: DecodePolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowUpConfig {
    pub steps: Vec<FollowUpStep>,
}

/// A command the user is told to run next. Never executed by Rebrand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpStep {
    pub name: String,
    pub command: String,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude_dirs: owned(DEFAULT_EXCLUDED_DIRS),
            exclude_files: owned(DEFAULT_EXCLUDED_FILES),
            extensions: owned(DEFAULT_EXTENSIONS),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl Default for FollowUpConfig {
    fn default() -> Self {
        let step = |name: &str, command: &str| FollowUpStep {
            name: name.into(),
            command: command.into(),
        };
        Self {
            steps: vec![
                step("clean", "dotnet clean"),
                step("restore", "dotnet restore"),
                step("build", "dotnet build"),
                step("test", "dotnet test"),
            ],
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then environment.
    ///
    /// `config_file` is the path the user passed via `--config`; it must
    /// exist. Without it the local and per-user files are optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let path = Self::active_path(config_file);
        debug!(path = %path.display(), explicit = config_file.is_some(), "Loading configuration");

        let defaults = Config::try_from(&Self::default())
            .context("Failed to build default configuration")?;

        let settings = Config::builder()
            .add_source(defaults)
            .add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(config_file.is_some()),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("scan.exclude_dirs")
                    .with_list_parse_key("scan.exclude_files")
                    .with_list_parse_key("scan.extensions"),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// The file [`Self::load`] reads: `--config`, else `./.rebrand.toml` when
    /// present, else the per-user file.
    pub fn active_path(config_file: Option<&PathBuf>) -> PathBuf {
        if let Some(path) = config_file {
            return path.clone();
        }
        let local = Path::new(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return local.to_path_buf();
        }
        Self::config_path()
    }

    /// Path to the per-user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.rebrand.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "rebrand", "rebrand")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Look up a dotted key, rendered for display.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "rename.from" => self.rename.from.clone().unwrap_or_default(),
            "rename.to" => self.rename.to.clone().unwrap_or_default(),
            "rename.extra_pairs" => self
                .rename
                .extra_pairs
                .iter()
                .map(|p| format!("{} -> {}", p.from, p.to))
                .collect::<Vec<_>>()
                .join(", "),
            "scan.exclude_dirs" => self.scan.exclude_dirs.join(", "),
            "scan.exclude_files" => self.scan.exclude_files.join(", "),
            "scan.extensions" => self.scan.extensions.join(", "),
            "content.on_decode_error" => self.content.on_decode_error.to_string(),
            "output.no_color" => self.output.no_color.to_string(),
            "output.format" => self.output.format.clone(),
            "follow_up.steps" => self
                .follow_up
                .steps
                .iter()
                .map(|s| s.command.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            _ => return None,
        };
        Some(value)
    }
}
