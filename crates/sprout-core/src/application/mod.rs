//! Application layer for Sprout.
//!
//! This layer contains:
//! - **Services**: Pipeline stages and the `ScaffoldService` orchestrator
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Progress**: Stage identifiers and the events reported while running
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer; URL patterns, naming
//! rules, and package-manager selection live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod progress;
pub mod services;

// Re-export main services
pub use services::{
    DEFAULT_COMMIT_MESSAGE, ScaffoldOptions, ScaffoldPlan, ScaffoldReport, ScaffoldRequest,
    ScaffoldService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{ArchiveExtractor, CommandRunner, Filesystem, HttpClient, ProgressReporter};

pub use error::{ApplicationError, VersionLookupError};
pub use progress::{ProgressEvent, Stage};
