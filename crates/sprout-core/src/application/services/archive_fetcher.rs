//! Archive Fetcher - downloads the template archive to disk.

use std::path::Path;

use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, HttpClient},
    },
    error::SproutResult,
};

/// Downloads an archive in one request and writes it verbatim.
pub struct ArchiveFetcher<'a> {
    http: &'a dyn HttpClient,
    filesystem: &'a dyn Filesystem,
}

impl<'a> ArchiveFetcher<'a> {
    pub fn new(http: &'a dyn HttpClient, filesystem: &'a dyn Filesystem) -> Self {
        Self { http, filesystem }
    }

    /// Fetch `url` into `dest`. Returns the number of bytes written.
    ///
    /// Any failure is [`ApplicationError::ArchiveDownload`]; nothing is
    /// retried and nothing is cleaned up.
    #[instrument(skip(self), fields(dest = %dest.display()))]
    pub fn fetch(&self, url: &str, dest: &Path) -> SproutResult<usize> {
        let response = self
            .http
            .get(url)
            .map_err(|e| ApplicationError::ArchiveDownload {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        if !response.is_success() {
            return Err(ApplicationError::ArchiveDownload {
                url: url.to_string(),
                reason: format!("HTTP {}", response.status),
            }
            .into());
        }

        self.filesystem.write_file(dest, &response.body)?;

        info!(bytes = response.body.len(), "Archive downloaded");
        Ok(response.body.len())
    }
}
