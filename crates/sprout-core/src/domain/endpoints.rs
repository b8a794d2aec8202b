//! Remote URL patterns for tag listing, archive download, and raw files.

use crate::domain::error::DomainError;
use crate::domain::value_objects::{MetadataFile, TemplateRef, Version};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_ARCHIVE_BASE: &str = "https://github.com";
pub const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";

/// Base URLs of the source forge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api_base: String,
    archive_base: String,
    raw_base: String,
}

impl Endpoints {
    /// Build from custom bases. Trailing slashes are dropped.
    pub fn new(
        api_base: impl AsRef<str>,
        archive_base: impl AsRef<str>,
        raw_base: impl AsRef<str>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            api_base: normalize(api_base.as_ref())?,
            archive_base: normalize(archive_base.as_ref())?,
            raw_base: normalize(raw_base.as_ref())?,
        })
    }

    /// `<api>/repos/<owner>/<repo>/tags`
    pub fn tags_url(&self, template: &TemplateRef) -> String {
        format!("{}/repos/{}/tags", self.api_base, template)
    }

    /// `<archive>/<owner>/<repo>/archive/<version>.zip`
    pub fn archive_url(&self, template: &TemplateRef, version: &Version) -> String {
        format!("{}/{}/archive/{}.zip", self.archive_base, template, version)
    }

    /// `<raw>/<owner>/<repo>/<version>/<file>`
    pub fn raw_file_url(
        &self,
        template: &TemplateRef,
        version: &Version,
        file: MetadataFile,
    ) -> String {
        format!(
            "{}/{}/{}/{}",
            self.raw_base,
            template,
            version,
            file.file_name()
        )
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            archive_base: DEFAULT_ARCHIVE_BASE.into(),
            raw_base: DEFAULT_RAW_BASE.into(),
        }
    }
}

fn normalize(url: &str) -> Result<String, DomainError> {
    let trimmed = url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(DomainError::InvalidEndpoint {
            url: url.to_string(),
            reason: "unsupported scheme",
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> TemplateRef {
        TemplateRef::new("owner", "repo")
    }

    #[test]
    fn default_urls_point_at_github() {
        let e = Endpoints::default();
        assert_eq!(
            e.tags_url(&template()),
            "https://api.github.com/repos/owner/repo/tags"
        );
        assert_eq!(
            e.archive_url(&template(), &Version::from_tag("v2.0.0")),
            "https://github.com/owner/repo/archive/v2.0.0.zip"
        );
        assert_eq!(
            e.raw_file_url(&template(), &Version::FallbackBranch, MetadataFile::GitIgnore),
            "https://raw.githubusercontent.com/owner/repo/master/.gitignore"
        );
    }

    #[test]
    fn fallback_version_is_used_as_archive_segment() {
        let e = Endpoints::default();
        assert_eq!(
            e.archive_url(&template(), &Version::FallbackBranch),
            "https://github.com/owner/repo/archive/master.zip"
        );
    }

    #[test]
    fn custom_bases_drop_trailing_slash() {
        let e = Endpoints::new("http://127.0.0.1:1/", "http://a/", "http://b").unwrap();
        assert_eq!(e.tags_url(&template()), "http://127.0.0.1:1/repos/owner/repo/tags");
        assert_eq!(
            e.raw_file_url(&template(), &Version::FallbackBranch, MetadataFile::GitAttributes),
            "http://b/owner/repo/master/.gitattributes"
        );
    }

    #[test]
    fn non_http_base_is_rejected() {
        assert!(matches!(
            Endpoints::new("ftp://x", DEFAULT_ARCHIVE_BASE, DEFAULT_RAW_BASE),
            Err(DomainError::InvalidEndpoint { .. })
        ));
    }
}
