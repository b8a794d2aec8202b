//! Version Resolver - finds the most recent tag of a template repository.

use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{VersionLookupError, ports::HttpClient},
    domain::{Endpoints, FALLBACK_BRANCH, TemplateRef, Version},
};

/// One element of the tag-listing response. Other fields are ignored.
#[derive(Debug, Deserialize)]
struct TagRecord {
    name: String,
}

/// Outcome of [`VersionResolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionResolution {
    pub version: Version,
    /// Why the fallback branch was used, when it was.
    pub fallback: Option<VersionLookupError>,
}

/// Resolves the version to download with a single best-effort request.
pub struct VersionResolver<'a> {
    http: &'a dyn HttpClient,
    endpoints: &'a Endpoints,
}

impl<'a> VersionResolver<'a> {
    pub fn new(http: &'a dyn HttpClient, endpoints: &'a Endpoints) -> Self {
        Self { http, endpoints }
    }

    /// Name of the first tag reported by the endpoint.
    ///
    /// The endpoint's ordering is trusted; later elements are never parsed.
    #[instrument(skip(self), fields(template = %template))]
    pub fn lookup(&self, template: &TemplateRef) -> Result<String, VersionLookupError> {
        let url = self.endpoints.tags_url(template);
        debug!(%url, "Listing tags");

        let response = self
            .http
            .get(&url)
            .map_err(|e| VersionLookupError::Transport(e.to_string()))?;

        if !response.is_success() {
            return Err(VersionLookupError::Status(response.status));
        }

        let records: Vec<serde_json::Value> = serde_json::from_slice(&response.body)
            .map_err(|e| VersionLookupError::Malformed(e.to_string()))?;

        let first = records.into_iter().next().ok_or(VersionLookupError::NoTags)?;
        let record: TagRecord = serde_json::from_value(first)
            .map_err(|e| VersionLookupError::Malformed(e.to_string()))?;

        if record.name.is_empty() {
            return Err(VersionLookupError::NoTags);
        }

        Ok(record.name)
    }

    /// Resolve the version, falling back to the default branch on any error.
    pub fn resolve(&self, template: &TemplateRef) -> VersionResolution {
        match self.lookup(template) {
            Ok(name) => {
                info!(version = %name, "Latest template version resolved");
                VersionResolution {
                    version: Version::from_tag(name),
                    fallback: None,
                }
            }
            Err(reason) => {
                warn!(%reason, fallback = FALLBACK_BRANCH, "Tag lookup failed");
                VersionResolution {
                    version: Version::FallbackBranch,
                    fallback: Some(reason),
                }
            }
        }
    }
}
