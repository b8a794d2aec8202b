//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `sprout-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `HttpClient`: tag listing, archive and raw-file downloads
//!   - `ArchiveExtractor`: zip extraction
//!   - `Filesystem`: writes, renames, deletions
//!   - `CommandRunner`: git and package-manager subprocesses
//!   - `ProgressReporter`: stage-by-stage progress for the terminal
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    ArchiveExtractor, CommandOutcome, CommandRunner, ExtractedArchive, Filesystem, HttpClient,
    HttpResponse, NoopProgress, ProgressReporter, TransportError,
};

#[cfg(test)]
pub use output::{
    MockArchiveExtractor, MockCommandRunner, MockFilesystem, MockHttpClient, MockProgressReporter,
};
