//! Metadata Fetcher - best-effort copy of dotfiles from the raw source tree.

use std::path::Path;

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ports::{Filesystem, HttpClient, ProgressReporter},
        progress::ProgressEvent,
    },
    domain::{Endpoints, MetadataFile, TemplateRef, Version},
    error::SproutError,
};

/// Why one metadata file was skipped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetadataFetchError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("write failed: {0}")]
    Write(#[from] SproutError),
}

/// Per-file outcome of [`MetadataFetcher::fetch_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataReport {
    pub fetched: Vec<MetadataFile>,
    pub skipped: Vec<(MetadataFile, MetadataFetchError)>,
}

pub struct MetadataFetcher<'a> {
    http: &'a dyn HttpClient,
    filesystem: &'a dyn Filesystem,
    endpoints: &'a Endpoints,
    progress: &'a dyn ProgressReporter,
}

impl<'a> MetadataFetcher<'a> {
    pub fn new(
        http: &'a dyn HttpClient,
        filesystem: &'a dyn Filesystem,
        endpoints: &'a Endpoints,
        progress: &'a dyn ProgressReporter,
    ) -> Self {
        Self {
            http,
            filesystem,
            endpoints,
            progress,
        }
    }

    /// Try every [`MetadataFile`] independently. Never fails.
    #[instrument(skip(self), fields(template = %template, version = %version))]
    pub fn fetch_all(
        &self,
        template: &TemplateRef,
        version: &Version,
        project_dir: &Path,
    ) -> MetadataReport {
        let mut report = MetadataReport::default();

        for file in MetadataFile::ALL {
            match self.fetch_one(template, version, file, project_dir) {
                Ok(()) => {
                    info!(%file, "Metadata file copied");
                    self.progress.report(ProgressEvent::MetadataFetched { file });
                    report.fetched.push(file);
                }
                Err(e) => {
                    warn!(%file, error = %e, "Metadata file skipped");
                    self.progress.report(ProgressEvent::MetadataSkipped {
                        file,
                        reason: e.to_string(),
                    });
                    report.skipped.push((file, e));
                }
            }
        }

        report
    }

    fn fetch_one(
        &self,
        template: &TemplateRef,
        version: &Version,
        file: MetadataFile,
        project_dir: &Path,
    ) -> Result<(), MetadataFetchError> {
        let url = self.endpoints.raw_file_url(template, version, file);
        let response = self
            .http
            .get(&url)
            .map_err(|e| MetadataFetchError::Transport(e.to_string()))?;

        if !response.is_success() {
            return Err(MetadataFetchError::Status(response.status));
        }

        self.filesystem
            .write_file(&project_dir.join(file.file_name()), &response.body)?;
        Ok(())
    }
}
