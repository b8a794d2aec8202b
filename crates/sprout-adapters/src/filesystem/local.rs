//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use sprout_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{SproutError, SproutResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn write_file(&self, path: &Path, content: &[u8]) -> SproutResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn rename(&self, from: &Path, to: &Path) -> SproutResult<()> {
        // std::fs::rename silently replaces an empty directory on Unix.
        if to.exists() {
            return Err(map_io_error(
                to,
                io::Error::new(io::ErrorKind::AlreadyExists, "destination already exists"),
                "rename into",
            ));
        }
        std::fs::rename(from, to).map_err(|e| map_io_error(from, e, "rename"))
    }

    fn remove_file(&self, path: &Path) -> SproutResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> SproutError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_moves_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let from = tmp.path().join("repo-2.0.0");
        std::fs::create_dir(&from).unwrap();
        std::fs::write(from.join("package.json"), "{}").unwrap();

        let to = tmp.path().join("my-app");
        LocalFilesystem::new().rename(&from, &to).unwrap();

        assert!(!from.exists());
        assert!(to.join("package.json").exists());
    }

    #[test]
    fn rename_refuses_existing_destination() {
        let tmp = tempfile::tempdir().unwrap();
        let from = tmp.path().join("master");
        let to = tmp.path().join("my-app");
        std::fs::create_dir(&from).unwrap();
        std::fs::create_dir(&to).unwrap();

        let err = LocalFilesystem::new().rename(&from, &to).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert!(from.exists());
    }

    #[test]
    fn write_then_remove_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("master.zip");
        let fs = LocalFilesystem::new();

        fs.write_file(&path, b"PK").unwrap();
        assert!(fs.exists(&path));
        assert_eq!(std::fs::read(&path).unwrap(), b"PK");

        fs.remove_file(&path).unwrap();
        assert!(!fs.exists(&path));
    }

    #[test]
    fn missing_file_removal_is_filesystem_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = LocalFilesystem::new()
            .remove_file(&tmp.path().join("nope.zip"))
            .unwrap_err();
        assert!(matches!(
            err,
            SproutError::Application(ApplicationError::FilesystemError { .. })
        ));
    }
}
