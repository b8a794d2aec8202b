//! Dependency Installer - git init, package install, initial commit.

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandRunner, Filesystem, ProgressReporter},
        progress::ProgressEvent,
    },
    domain::{CommandSpec, PackageManager},
    error::SproutResult,
};

/// Run `spec` and turn a non-success outcome into
/// [`ApplicationError::CommandFailed`] carrying the process' exit code.
///
/// Every subprocess in the pipeline goes through here.
pub fn run_checked(runner: &dyn CommandRunner, spec: &CommandSpec) -> SproutResult<()> {
    debug!(command = %spec, cwd = %spec.cwd.display(), "Running command");
    let outcome = runner.run(spec)?;

    if outcome.success() {
        Ok(())
    } else {
        Err(ApplicationError::CommandFailed {
            command: spec.to_string(),
            code: outcome.code,
        }
        .into())
    }
}

/// Outcome of [`DependencyInstaller::install`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub package_manager: PackageManager,
    pub committed: bool,
}

pub struct DependencyInstaller<'a> {
    filesystem: &'a dyn Filesystem,
    runner: &'a dyn CommandRunner,
    progress: &'a dyn ProgressReporter,
}

impl<'a> DependencyInstaller<'a> {
    pub fn new(
        filesystem: &'a dyn Filesystem,
        runner: &'a dyn CommandRunner,
        progress: &'a dyn ProgressReporter,
    ) -> Self {
        Self {
            filesystem,
            runner,
            progress,
        }
    }

    /// Pick the package manager present in `project_dir`.
    pub fn detect(&self, project_dir: &Path) -> PackageManager {
        let lock_file = project_dir.join(PackageManager::ALTERNATE_LOCK_FILE);
        PackageManager::detect(self.filesystem.exists(&lock_file))
    }

    /// Initialise git, install dependencies, and commit when
    /// `commit_message` is given.
    ///
    /// Stops at the first failing subprocess.
    #[instrument(skip(self, commit_message), fields(project = %project_dir.display()))]
    pub fn install(
        &self,
        project_dir: &Path,
        commit_message: Option<&str>,
    ) -> SproutResult<InstallReport> {
        let package_manager = self.detect(project_dir);
        info!(%package_manager, "Package manager selected");
        self.progress
            .report(ProgressEvent::PackageManagerSelected(package_manager));

        self.run(&CommandSpec::git(["init"], project_dir))?;
        self.run(&package_manager.install_command(project_dir))?;
        self.progress.report(ProgressEvent::DependenciesInstalled);

        let committed = match commit_message {
            Some(message) => {
                self.run(&CommandSpec::git(["add", "."], project_dir))?;
                self.run(&CommandSpec::git(["commit", "-m", message], project_dir))?;
                true
            }
            None => false,
        };

        Ok(InstallReport {
            package_manager,
            committed,
        })
    }

    fn run(&self, spec: &CommandSpec) -> SproutResult<()> {
        self.progress.report(ProgressEvent::CommandStarted {
            command: spec.to_string(),
        });
        run_checked(self.runner, spec)
    }
}
