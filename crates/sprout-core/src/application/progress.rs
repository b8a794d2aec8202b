//! Pipeline stages and the progress events emitted while they run.

use std::fmt;

use crate::domain::{MetadataFile, PackageManager, Version};

/// User-visible pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    ResolveVersion,
    FetchArchive,
    ExtractArchive,
    RenameDirectory,
    RemoveArchive,
    FetchMetadata,
    InstallDependencies,
}

impl Stage {
    pub const COUNT: usize = 7;

    /// 1-based position in the pipeline.
    pub const fn index(&self) -> usize {
        match self {
            Self::ResolveVersion => 1,
            Self::FetchArchive => 2,
            Self::ExtractArchive => 3,
            Self::RenameDirectory => 4,
            Self::RemoveArchive => 5,
            Self::FetchMetadata => 6,
            Self::InstallDependencies => 7,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::ResolveVersion => "Resolving latest template version",
            Self::FetchArchive => "Fetching template archive",
            Self::ExtractArchive => "Extracting template",
            Self::RenameDirectory => "Renaming template",
            Self::RemoveArchive => "Removing template archive",
            Self::FetchMetadata => "Fetching repository metadata",
            Self::InstallDependencies => "Installing dependencies",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}/{}] {}", self.index(), Self::COUNT, self.label())
    }
}

/// Something the user may want to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    StageStarted(Stage),
    StageSkipped(Stage),
    VersionResolved { version: Version },
    VersionFallback { reason: String },
    ArchiveDownloaded { file: String },
    ArchiveExtracted { file: String },
    DirectoryRenamed { from: String, to: String },
    ArchiveRemoved { file: String },
    MetadataFetched { file: MetadataFile },
    MetadataSkipped { file: MetadataFile, reason: String },
    PackageManagerSelected(PackageManager),
    CommandStarted { command: String },
    DependenciesInstalled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_display_has_counter() {
        assert_eq!(
            Stage::FetchArchive.to_string(),
            "[2/7] Fetching template archive"
        );
        assert_eq!(Stage::InstallDependencies.index(), Stage::COUNT);
    }
}
