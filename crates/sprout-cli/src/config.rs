//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `SPROUT_<SECTION>__<KEY>`,
//!    e.g. `SPROUT_SOURCES__API_BASE`
//! 3. Config file (`--config FILE`, or [`AppConfig::config_path`])
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use sprout_adapters::DEFAULT_USER_AGENT;
use sprout_core::{
    application::DEFAULT_COMMIT_MESSAGE,
    domain::{DEFAULT_API_BASE, DEFAULT_ARCHIVE_BASE, DEFAULT_RAW_BASE},
};

/// Prefix of environment variables that override config values.
pub const ENV_PREFIX: &str = "SPROUT";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Template selection.
    pub template: TemplateConfig,
    /// Where tags, archives, and raw files are fetched from.
    pub sources: SourcesConfig,
    /// Which optional pipeline stages run.
    pub scaffold: ScaffoldConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// `owner/repo` used when `--template` is absent.
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub api_base: String,
    pub archive_base: String,
    pub raw_base: String,
    pub user_agent: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            archive_base: DEFAULT_ARCHIVE_BASE.into(),
            raw_base: DEFAULT_RAW_BASE.into(),
            user_agent: DEFAULT_USER_AGENT.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    pub fetch_metadata: bool,
    pub install_dependencies: bool,
    pub initial_commit: bool,
    pub commit_message: String,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            fetch_metadata: true,
            install_dependencies: true,
            initial_commit: true,
            commit_message: DEFAULT_COMMIT_MESSAGE.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from defaults, the config file, and the
    /// environment.
    ///
    /// An explicit `config_file` must exist; the default location may be
    /// absent.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        if required && !path.exists() {
            anyhow::bail!("config file not found: {}", path.display());
        }

        let defaults =
            Config::try_from(&Self::default()).context("Failed to encode built-in defaults")?;

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.sprout.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "sprout", "sprout")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".sprout.toml"))
    }
}
