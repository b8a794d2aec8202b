//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use sprout_core::{
    application::{ApplicationError, ports::Filesystem},
    error::SproutResult,
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can keep one handle and give the other to
/// the service under test.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, Vec<u8>>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Register a directory and its ancestors (testing helper).
    pub fn add_dir(&self, path: &Path) {
        let mut inner = self.inner.write().unwrap();
        insert_ancestors(&mut inner.directories, path);
    }

    /// Put a file, creating its parent directories (testing helper).
    pub fn add_file(&self, path: &Path, content: impl Into<Vec<u8>>) {
        let mut inner = self.inner.write().unwrap();
        if let Some(parent) = path.parent() {
            insert_ancestors(&mut inner.directories, parent);
        }
        inner.files.insert(path.to_path_buf(), content.into());
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<Vec<u8>> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

fn insert_ancestors(directories: &mut HashSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

/// `path` with its `from` prefix swapped for `to`.
fn reparent(path: &Path, from: &Path, to: &Path) -> PathBuf {
    match path.strip_prefix(from) {
        Ok(rest) if rest.as_os_str().is_empty() => to.to_path_buf(),
        Ok(rest) => to.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

impl Filesystem for MemoryFilesystem {
    fn write_file(&self, path: &Path, content: &[u8]) -> SproutResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> SproutResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if inner.files.contains_key(to) || inner.directories.contains(to) {
            return Err(ApplicationError::FilesystemError {
                path: to.to_path_buf(),
                reason: "Destination already exists".into(),
            }
            .into());
        }
        if !inner.files.contains_key(from) && !inner.directories.contains(from) {
            return Err(ApplicationError::FilesystemError {
                path: from.to_path_buf(),
                reason: "No such file or directory".into(),
            }
            .into());
        }

        let files = std::mem::take(&mut inner.files);
        inner.files = files
            .into_iter()
            .map(|(p, c)| (reparent(&p, from, to), c))
            .collect();

        let directories = std::mem::take(&mut inner.directories);
        inner.directories = directories
            .into_iter()
            .map(|p| reparent(&p, from, to))
            .collect();

        Ok(())
    }

    fn remove_file(&self, path: &Path) -> SproutResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| {
                ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "No such file".into(),
                }
                .into()
            })
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_moves_the_whole_subtree() {
        let fs = MemoryFilesystem::new();
        fs.add_file(Path::new("/work/master/src/index.js"), "x");
        fs.add_file(Path::new("/work/master.zip"), "PK");

        fs.rename(Path::new("/work/master"), Path::new("/work/app"))
            .unwrap();

        assert!(fs.exists(Path::new("/work/app/src/index.js")));
        assert!(fs.exists(Path::new("/work/app/src")));
        assert!(!fs.exists(Path::new("/work/master")));
        // sibling with a shared name prefix is untouched
        assert!(fs.exists(Path::new("/work/master.zip")));
    }

    #[test]
    fn rename_onto_existing_path_fails() {
        let fs = MemoryFilesystem::new();
        fs.add_dir(Path::new("/work/master"));
        fs.add_dir(Path::new("/work/app"));
        assert!(fs.rename(Path::new("/work/master"), Path::new("/work/app")).is_err());
    }

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/nowhere/x"), b"x").is_err());
        fs.add_dir(Path::new("/work"));
        fs.write_file(Path::new("/work/x"), b"x").unwrap();
        assert_eq!(fs.read_file(Path::new("/work/x")), Some(b"x".to_vec()));
    }

    #[test]
    fn remove_missing_file_fails() {
        let fs = MemoryFilesystem::new();
        assert!(fs.remove_file(Path::new("/work/master.zip")).is_err());
    }
}
