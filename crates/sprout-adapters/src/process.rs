//! Subprocess adapter using `std::process`.

use std::process::Command;

use tracing::instrument;

use sprout_core::{
    application::{
        ApplicationError,
        ports::{CommandOutcome, CommandRunner},
    },
    domain::CommandSpec,
    error::SproutResult,
};

/// Runs commands with inherited stdio and waits for them.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    #[instrument(skip_all, fields(command = %spec, cwd = %spec.cwd.display()))]
    fn run(&self, spec: &CommandSpec) -> SproutResult<CommandOutcome> {
        let status = build_command(spec)
            .status()
            .map_err(|e| ApplicationError::CommandSpawn {
                command: spec.to_string(),
                reason: e.to_string(),
            })?;

        Ok(CommandOutcome {
            code: status.code(),
        })
    }
}

/// `cmd /C <program>` on Windows for shell-resolved programs, else direct.
fn build_command(spec: &CommandSpec) -> Command {
    let mut command = if cfg!(windows) && spec.shell_resolved {
        let mut shell = Command::new("cmd");
        shell.arg("/C").arg(&spec.program);
        shell
    } else {
        Command::new(&spec.program)
    };
    command.args(&spec.args).current_dir(&spec.cwd);
    command
}
