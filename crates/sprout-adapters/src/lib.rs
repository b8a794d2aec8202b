//! Infrastructure adapters for Sprout.
//!
//! This crate implements the ports defined in `sprout-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod archive;
pub mod filesystem;
pub mod http;
pub mod process;

// Re-export commonly used adapters
pub use archive::ZipExtractor;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use http::{DEFAULT_USER_AGENT, ReqwestClient};
pub use process::SystemCommandRunner;
