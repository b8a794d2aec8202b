//! Core domain layer for Sprout.
//!
//! This module contains pure logic with no I/O. Network, archives,
//! filesystem, and subprocesses are reached through ports (traits) defined in
//! the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No external crates**: Only std library + thiserror
//! - **Immutable values**: All domain objects are Clone + PartialEq

// Public API - what the world sees
pub mod command;
pub mod endpoints;
pub mod error;
pub mod value_objects;

pub use command::{CommandSpec, PackageManager};
pub use endpoints::{DEFAULT_API_BASE, DEFAULT_ARCHIVE_BASE, DEFAULT_RAW_BASE, Endpoints};
pub use error::{DomainError, ErrorCategory};
pub use value_objects::{
    DEFAULT_TEMPLATE, FALLBACK_BRANCH, MetadataFile, ProjectName, TemplateRef, Version,
    archive_file_name,
};
