//! # Sprout CLI
//!
//! Create a new app from a GitHub template repository.
//!
//! ## Startup sequence
//!
//! 1. Load `.env`, parse CLI arguments (clap handles `--help` / `--version`).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (defaults + file + env).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                               |
//! |------|---------------------------------------|
//! |  0   | Success                               |
//! |  1   | Internal, system, or network error    |
//! |  2   | User / input error                    |
//! |  3   | Resource not found                    |
//! |  4   | Configuration error                   |
//! |  N   | A git or package manager step exited with N |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod progress;

fn main() -> ExitCode {
    // Missing .env is fine.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    // --help / --version arrive here as "errors" that must exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    let verbose = cli.global.verbose > 0;
    match run(cli) {
        Ok(()) => {
            info!("Sprout completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli) -> CliResult<()> {
    let Cli {
        global,
        create,
        command,
    } = cli;

    if command.is_some() && !create.is_empty() {
        return Err(CliError::InvalidInput {
            message: "project arguments cannot be combined with a subcommand".into(),
            source: None,
        });
    }

    match command {
        // Neither reads the configuration, so a broken file must not stop them.
        Some(Commands::Completions(cmd)) => commands::completions::execute(cmd),
        Some(Commands::Init(cmd)) => {
            let output = OutputManager::new(&global, &AppConfig::default());
            commands::init::execute(cmd, global.config, output)
        }
        Some(Commands::Config(cmd)) => {
            let (config, output) = load(&global)?;
            let active = global.config.unwrap_or_else(AppConfig::config_path);
            commands::config::execute(cmd, config, &active, output)
        }
        None => {
            let (config, output) = load(&global)?;
            commands::create::execute(create, config, output)
        }
    }
}

/// Load configuration (step 3) and build the output manager (step 4).
fn load(global: &GlobalArgs) -> CliResult<(AppConfig, OutputManager)> {
    let config = AppConfig::load(global.config.as_ref()).map_err(|e| CliError::ConfigError {
        message: format!("{e:#}"),
        source: None,
    })?;
    let output = OutputManager::new(global, &config);
    Ok((config, output))
}

/// Translate a `CliError` into a user message and an exit code.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    // stderr, so the message survives a redirected stdout.
    let msg = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
