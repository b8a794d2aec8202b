//! Application services - orchestrate use cases.
//!
//! Each pipeline stage is a small service borrowing the ports it needs;
//! `ScaffoldService` owns the adapters and runs the stages in order.

pub mod archive_fetcher;
pub mod dependency_installer;
pub mod metadata_fetcher;
pub mod scaffold_service;
pub mod version_resolver;

pub use archive_fetcher::ArchiveFetcher;
pub use dependency_installer::{DependencyInstaller, InstallReport, run_checked};
pub use metadata_fetcher::{MetadataFetchError, MetadataFetcher, MetadataReport};
pub use scaffold_service::{
    DEFAULT_COMMIT_MESSAGE, ScaffoldOptions, ScaffoldPlan, ScaffoldReport, ScaffoldRequest,
    ScaffoldService,
};
pub use version_resolver::{VersionResolution, VersionResolver};
