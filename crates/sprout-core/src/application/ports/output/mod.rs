//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `sprout-adapters` crate provides implementations.

use std::fmt;
use std::path::Path;

use crate::application::progress::ProgressEvent;
use crate::domain::CommandSpec;
use crate::error::SproutResult;

/// A fully-read HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response (DNS, connect, TLS, read).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError(pub String);

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for TransportError {}

/// Port for HTTP GET requests.
///
/// Implemented by:
/// - `sprout_adapters::http::ReqwestClient` (production)
///
/// A non-2xx status is a response, not an error.
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

/// What the extractor found at the top of the archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedArchive {
    /// Name of the single top-level directory, when the archive has one.
    pub root: Option<String>,
}

/// Port for unpacking archives.
///
/// Implemented by:
/// - `sprout_adapters::archive::ZipExtractor` (production)
#[cfg_attr(test, mockall::automock)]
pub trait ArchiveExtractor: Send + Sync {
    /// Unpack every entry of `archive` under `dest`.
    fn extract(&self, archive: &Path, dest: &Path) -> SproutResult<ExtractedArchive>;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `sprout_adapters::filesystem::LocalFilesystem` (production)
/// - `sprout_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &[u8]) -> SproutResult<()>;

    /// Rename a file or directory.
    fn rename(&self, from: &Path, to: &Path) -> SproutResult<()>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> SproutResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// How a subprocess ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutcome {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl CommandOutcome {
    pub const fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// Port for running subprocesses to completion.
///
/// Implemented by:
/// - `sprout_adapters::process::SystemCommandRunner` (production)
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Run `spec`, inheriting stdio. Fails only when the process could not
    /// be started.
    fn run(&self, spec: &CommandSpec) -> SproutResult<CommandOutcome>;
}

/// Port for user-facing progress.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: ProgressEvent);
}

/// Reporter that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn report(&self, _event: ProgressEvent) {}
}
