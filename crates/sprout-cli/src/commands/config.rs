//! `sprout config`: inspect configuration values.

use std::path::Path;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
///
/// `active_path` is the file the configuration was loaded from.
pub fn execute(
    cmd: ConfigCommands,
    config: AppConfig,
    active_path: &Path,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&value)?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            output.print(&active_path.display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let scaffold = &config.scaffold;
    let sources = &config.sources;
    match key {
        "template.default" => Ok(config.template.default.clone().unwrap_or_default()),
        "sources.api_base" => Ok(sources.api_base.clone()),
        "sources.archive_base" => Ok(sources.archive_base.clone()),
        "sources.raw_base" => Ok(sources.raw_base.clone()),
        "sources.user_agent" => Ok(sources.user_agent.clone()),
        "scaffold.fetch_metadata" => Ok(scaffold.fetch_metadata.to_string()),
        "scaffold.install_dependencies" => Ok(scaffold.install_dependencies.to_string()),
        "scaffold.initial_commit" => Ok(scaffold.initial_commit.to_string()),
        "scaffold.commit_message" => Ok(scaffold.commit_message.clone()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
