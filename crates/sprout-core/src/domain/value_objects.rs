//! Domain value objects: TemplateRef, Version, ProjectName, MetadataFile.
//!
//! # Design
//!
//! These are pure value types: equality-by-value, no identity, no I/O.
//! Everything the pipeline threads from stage to stage is one of these.

use crate::domain::error::DomainError;
use std::fmt;
use std::str::FromStr;

/// Template used when neither `--template` nor the config names one.
pub const DEFAULT_TEMPLATE: &str = "alreadyExisted/das-react-template";

/// Branch used as the version when no tag can be resolved.
///
/// Also the project name when none is given on the command line.
pub const FALLBACK_BRANCH: &str = "master";

// ── TemplateRef ──────────────────────────────────────────────────────────────

/// An `owner/repo` pair identifying a template repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateRef {
    owner: String,
    repo: String,
}

impl TemplateRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl Default for TemplateRef {
    fn default() -> Self {
        // DEFAULT_TEMPLATE is a well-formed literal.
        let (owner, repo) = DEFAULT_TEMPLATE
            .split_once('/')
            .unwrap_or(("alreadyExisted", "das-react-template"));
        Self::new(owner, repo)
    }
}

impl fmt::Display for TemplateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for TemplateRef {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| DomainError::InvalidTemplateRef {
            input: s.to_string(),
            reason,
        };

        let (owner, repo) = s.trim().split_once('/').ok_or_else(|| invalid("missing '/'"))?;

        if owner.is_empty() {
            return Err(invalid("owner is empty"));
        }
        if repo.is_empty() {
            return Err(invalid("repository name is empty"));
        }
        if repo.contains('/') {
            return Err(invalid("expected exactly one '/'"));
        }

        Ok(Self::new(owner, repo))
    }
}

// ── Version ──────────────────────────────────────────────────────────────────

/// The revision of the template to download.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Version {
    /// A tag name exactly as reported by the tag-listing endpoint.
    Tag(String),
    /// The fallback branch marker.
    FallbackBranch,
}

impl Version {
    /// Build a version from a tag name.
    ///
    /// A tag literally named after the fallback branch is the fallback.
    pub fn from_tag(name: impl Into<String>) -> Self {
        let name = name.into();
        if name == FALLBACK_BRANCH {
            Self::FallbackBranch
        } else {
            Self::Tag(name)
        }
    }

    /// URL segment for this version.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Tag(name) => name,
            Self::FallbackBranch => FALLBACK_BRANCH,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base name of the downloaded archive and of its top-level folder.
///
/// The first character of the tag is dropped: `v2.0.0` → `repo-2.0.0`.
pub fn archive_file_name(template: &TemplateRef, version: &Version) -> String {
    match version {
        Version::FallbackBranch => FALLBACK_BRANCH.to_string(),
        Version::Tag(name) => {
            let mut chars = name.chars();
            chars.next();
            format!("{}-{}", template.repo(), chars.as_str())
        }
    }
}

// ── ProjectName ──────────────────────────────────────────────────────────────

/// Name of the directory the template is extracted into.
///
/// Not validated: collisions and path separators surface as filesystem
/// errors when the extracted directory is renamed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Name from the first positional argument.
    ///
    /// A missing or empty argument yields [`FALLBACK_BRANCH`].
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some(name) if !name.is_empty() => Self::new(name),
            _ => Self::new(FALLBACK_BRANCH),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_fallback(&self) -> bool {
        self.0 == FALLBACK_BRANCH
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<std::path::Path> for ProjectName {
    fn as_ref(&self) -> &std::path::Path {
        std::path::Path::new(&self.0)
    }
}

// ── MetadataFile ─────────────────────────────────────────────────────────────

/// Auxiliary dotfiles copied from the template's raw source tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataFile {
    GitIgnore,
    GitAttributes,
}

impl MetadataFile {
    pub const ALL: [MetadataFile; 2] = [Self::GitIgnore, Self::GitAttributes];

    pub const fn file_name(&self) -> &'static str {
        match self {
            Self::GitIgnore => ".gitignore",
            Self::GitAttributes => ".gitattributes",
        }
    }
}

impl fmt::Display for MetadataFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}
