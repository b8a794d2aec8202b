//! Subprocess invocations and package-manager selection.

use std::fmt;
use std::path::{Path, PathBuf};

/// A subprocess to run, fully described.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    /// The executable is resolved through the command shell on Windows
    /// (`npm`/`yarn` ship as `.cmd` shims).
    pub shell_resolved: bool,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I, cwd: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.into(),
            shell_resolved: false,
        }
    }

    pub fn shell_resolved(mut self) -> Self {
        self.shell_resolved = true;
        self
    }

    pub fn git<I, S>(args: I, cwd: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("git", args, cwd)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// The two recognised package managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    /// Primary.
    Npm,
    /// Alternate, selected by the presence of its lock file.
    Yarn,
}

impl PackageManager {
    /// Lock file whose presence selects [`PackageManager::Yarn`].
    pub const ALTERNATE_LOCK_FILE: &'static str = "yarn.lock";

    pub const fn detect(alternate_lock_file_present: bool) -> Self {
        if alternate_lock_file_present {
            Self::Yarn
        } else {
            Self::Npm
        }
    }

    pub const fn program(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
        }
    }

    pub fn install_command(&self, project_dir: &Path) -> CommandSpec {
        CommandSpec::new(self.program(), ["install"], project_dir).shell_resolved()
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}
