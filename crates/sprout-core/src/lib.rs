//! Sprout Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Sprout
//! template scaffolding tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           sprout-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ScaffoldService + pipeline stages)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Http, Archive, Filesystem, Commands)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     sprout-adapters (Infrastructure)    │
//! │ (ReqwestClient, ZipExtractor, etc)      │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (TemplateRef, Version, Endpoints)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sprout_core::prelude::*;
//!
//! let service = ScaffoldService::new(http, extractor, filesystem, runner);
//! let report = service.scaffold(&ScaffoldRequest {
//!     working_dir: "/tmp".into(),
//!     application_name: ProjectName::new("my-app"),
//!     template: "owner/repo".parse()?,
//!     options: ScaffoldOptions::default(),
//! })?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ProgressEvent, ScaffoldOptions, ScaffoldPlan, ScaffoldReport, ScaffoldRequest,
        ScaffoldService, Stage,
        ports::{ArchiveExtractor, CommandRunner, Filesystem, HttpClient, ProgressReporter},
    };
    pub use crate::domain::{
        CommandSpec, Endpoints, FALLBACK_BRANCH, MetadataFile, PackageManager, ProjectName,
        TemplateRef, Version,
    };
    pub use crate::error::{SproutError, SproutResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
