//! Application layer errors.
//!
//! These errors represent failures in orchestration: network, archive,
//! filesystem, and subprocess stages. Value-level errors are `DomainError`
//! from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while running the scaffolding pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// The template archive could not be downloaded (fatal).
    #[error("Failed to download template archive from {url}: {reason}")]
    ArchiveDownload { url: String, reason: String },

    /// The downloaded archive could not be extracted.
    #[error("Failed to extract {}: {reason}", archive.display())]
    Extraction { archive: PathBuf, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {}: {reason}", path.display())]
    FilesystemError { path: PathBuf, reason: String },

    /// A subprocess could not be started at all.
    #[error("Failed to run '{command}': {reason}")]
    CommandSpawn { command: String, reason: String },

    /// A subprocess ran and reported failure.
    #[error("'{command}' failed with {}", describe_code(*code))]
    CommandFailed { command: String, code: Option<i32> },

    /// In-memory adapter lock poisoned.
    #[error("Adapter state lock poisoned")]
    StoreLockError,
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".into(),
    }
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ArchiveDownload { url, .. } => vec![
                format!("Could not fetch: {}", url),
                "Check your network connection".into(),
                "Verify the template exists: --template=<owner>/<repo>".into(),
            ],
            Self::Extraction { archive, .. } => vec![
                format!("The archive is kept at {}", archive.display()),
                "The download may be corrupted; delete it and try again".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Make sure the project directory does not already exist".into(),
            ],
            Self::CommandSpawn { command, .. } => vec![
                format!("Could not start: {}", command),
                "Ensure the command is installed and in your PATH".into(),
            ],
            Self::CommandFailed { command, .. } => vec![
                format!("'{}' reported failure", command),
                "Check the command output above for details".into(),
            ],
            Self::StoreLockError => vec!["Internal state lock poisoned; try again".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ArchiveDownload { .. } => ErrorCategory::Network,
            Self::Extraction { .. } | Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::CommandSpawn { .. } => ErrorCategory::NotFound,
            Self::CommandFailed { .. } => ErrorCategory::Subprocess,
            Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}

/// Why the tag lookup did not produce a version.
///
/// Never surfaces as a pipeline error: the resolver substitutes the fallback
/// branch and keeps this as the reason.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VersionLookupError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("tag endpoint answered HTTP {0}")]
    Status(u16),

    #[error("malformed tag listing: {0}")]
    Malformed(String),

    #[error("repository has no tags")]
    NoTags,
}
