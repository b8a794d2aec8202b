//! Zip archive extraction.

use std::fs::File;
use std::path::Path;

use tracing::{debug, instrument};

use sprout_core::{
    application::{
        ApplicationError,
        ports::{ArchiveExtractor, ExtractedArchive},
    },
    error::SproutResult,
};

/// Extracts `.zip` archives with the `zip` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipExtractor;

impl ZipExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ArchiveExtractor for ZipExtractor {
    #[instrument(skip(self), fields(archive = %archive.display(), dest = %dest.display()))]
    fn extract(&self, archive: &Path, dest: &Path) -> SproutResult<ExtractedArchive> {
        let failed = |reason: String| ApplicationError::Extraction {
            archive: archive.to_path_buf(),
            reason,
        };

        let file = File::open(archive).map_err(|e| failed(e.to_string()))?;
        let mut zip = zip::ZipArchive::new(file).map_err(|e| failed(e.to_string()))?;

        let root = single_root(zip.file_names());
        debug!(entries = zip.len(), root = ?root, "Archive opened");

        zip.extract(dest).map_err(|e| failed(e.to_string()))?;

        Ok(ExtractedArchive { root })
    }
}

/// The one top-level directory every entry lives under, if there is one.
fn single_root<'a>(names: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut root: Option<&str> = None;
    for name in names {
        // A file at the top level means there is no single root.
        let (first, _) = name.split_once('/')?;
        match root {
            None => root = Some(first),
            Some(existing) if existing == first => {}
            Some(_) => return None,
        }
    }
    root.map(str::to_string)
}
