//! Project folder bound to a generator
//!
//! All reads and writes a generator performs go through a [`ProjectFolder`],
//! which resolves paths relative to its root and refuses anything that would
//! land outside of it. Requirement names come from manifests we don't control,
//! so every path is normalized before it touches the disk.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Error, Debug)]
pub enum FolderError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("Path escapes project folder: {0}")]
    OutsideFolder(PathBuf),
    #[error("Failed to access {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

/// Working directory a generator reads from and writes to
#[derive(Debug)]
pub struct ProjectFolder {
    root: PathBuf,
    // Held so the directory lives as long as the folder does
    _temp: Option<TempDir>,
}

impl ProjectFolder {
    /// Binds to an existing directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            _temp: None,
        }
    }

    /// Binds to a fresh temporary directory, removed when the folder is dropped
    pub fn temporary() -> Result<Self, FolderError> {
        let temp = TempDir::new().map_err(|source| FolderError::Io {
            path: std::env::temp_dir(),
            source,
        })?;
        debug!(path = %temp.path().display(), "Created temporary project folder");

        Ok(Self {
            root: temp.path().to_path_buf(),
            _temp: Some(temp),
        })
    }

    /// Binds to `root` when given, otherwise to a temporary directory
    pub fn new_or_temporary(root: Option<PathBuf>) -> Result<Self, FolderError> {
        match root {
            Some(root) => Ok(Self::new(root)),
            None => Self::temporary(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Resolves `relative` against the root, rejecting absolute paths, any
    /// `..` that climbs above the root, and symlinks inside the folder that
    /// point out of it
    pub fn resolve(&self, relative: impl AsRef<Path>) -> Result<PathBuf, FolderError> {
        let relative = relative.as_ref();
        let mut normalized = PathBuf::new();

        for component in relative.components() {
            match component {
                Component::Normal(part) => normalized.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    if !normalized.pop() {
                        return Err(FolderError::OutsideFolder(relative.to_path_buf()));
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(FolderError::OutsideFolder(relative.to_path_buf()));
                }
            }
        }

        let target = self.root.join(normalized);
        self.ensure_contained(&target, relative)?;
        Ok(target)
    }

    /// Follows links on the deepest part of `target` that already exists and
    /// checks the real location is still under the real root. Nothing exists
    /// under a root that hasn't been created yet, so that case passes.
    fn ensure_contained(&self, target: &Path, relative: &Path) -> Result<(), FolderError> {
        let Ok(root) = self.root.canonicalize() else {
            return Ok(());
        };

        let Some(existing) = target
            .ancestors()
            .take_while(|ancestor| ancestor.starts_with(&self.root))
            .find(|ancestor| ancestor.symlink_metadata().is_ok())
        else {
            return Ok(());
        };

        match existing.canonicalize() {
            Ok(real) if real.starts_with(&root) => Ok(()),
            Ok(real) => {
                debug!(
                    path = %relative.display(),
                    real = %real.display(),
                    "Path leaves project folder through a link"
                );
                Err(FolderError::OutsideFolder(relative.to_path_buf()))
            }
            // Dangling link
            Err(_) => Err(FolderError::OutsideFolder(relative.to_path_buf())),
        }
    }

    pub fn exists(&self, relative: impl AsRef<Path>) -> bool {
        self.resolve(relative)
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    pub fn read(&self, relative: impl AsRef<Path>) -> Result<String, FolderError> {
        let path = self.resolve(relative)?;
        trace!(path = %path.display(), "Reading file");

        fs::read_to_string(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                FolderError::NotFound(path)
            } else {
                FolderError::Io { path, source }
            }
        })
    }

    /// Writes `content`, creating parent directories and replacing any
    /// existing file
    pub fn write(&self, relative: impl AsRef<Path>, content: &str) -> Result<(), FolderError> {
        let path = self.resolve(relative)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| FolderError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&path, content).map_err(|source| FolderError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), bytes = content.len(), "Wrote file");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_parent_directories() {
        let folder = ProjectFolder::temporary().unwrap();
        folder.write("a/b/c.txt", "hello").unwrap();

        assert_eq!(folder.read("a/b/c.txt").unwrap(), "hello");
        assert!(folder.path().join("a/b").is_dir());
    }

    #[test]
    fn test_write_overwrites() {
        let folder = ProjectFolder::temporary().unwrap();
        folder.write("file.txt", "first").unwrap();
        folder.write("file.txt", "second").unwrap();

        assert_eq!(folder.read("file.txt").unwrap(), "second");
    }

    #[test]
    fn test_read_missing_file() {
        let folder = ProjectFolder::temporary().unwrap();
        match folder.read("missing.txt") {
            Err(FolderError::NotFound(path)) => assert!(path.ends_with("missing.txt")),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_parent_escape() {
        let folder = ProjectFolder::temporary().unwrap();
        assert!(matches!(
            folder.write("../escape.txt", "x"),
            Err(FolderError::OutsideFolder(_))
        ));
        assert!(matches!(
            folder.write("a/../../escape.txt", "x"),
            Err(FolderError::OutsideFolder(_))
        ));
    }

    #[test]
    fn test_rejects_absolute_path() {
        let folder = ProjectFolder::temporary().unwrap();
        assert!(matches!(
            folder.write("/etc/escape.txt", "x"),
            Err(FolderError::OutsideFolder(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_rejects_symlink_out_of_folder() {
        use std::os::unix::fs::symlink;

        let outside = TempDir::new().unwrap();
        let folder = ProjectFolder::temporary().unwrap();
        symlink(outside.path(), folder.path().join("link")).unwrap();

        assert!(matches!(
            folder.write("link/escaped.txt", "x"),
            Err(FolderError::OutsideFolder(_))
        ));
        assert!(!outside.path().join("escaped.txt").exists());
        assert!(!folder.exists("link/escaped.txt"));

        symlink(outside.path().join("secret.txt"), folder.path().join("file-link")).unwrap();
        assert!(matches!(
            folder.write("file-link", "x"),
            Err(FolderError::OutsideFolder(_))
        ));
        assert!(!outside.path().join("secret.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_allows_symlink_within_folder() {
        use std::os::unix::fs::symlink;

        let folder = ProjectFolder::temporary().unwrap();
        folder.write("real/keep.txt", "kept").unwrap();
        symlink(folder.path().join("real"), folder.path().join("alias")).unwrap();

        folder.write("alias/new.txt", "inside").unwrap();
        assert_eq!(folder.read("real/new.txt").unwrap(), "inside");
    }

    #[test]
    fn test_unborn_root_accepts_writes() {
        let dir = TempDir::new().unwrap();
        let folder = ProjectFolder::new(dir.path().join("not-yet"));

        folder.write("sub/file.txt", "x").unwrap();
        assert!(dir.path().join("not-yet/sub/file.txt").is_file());
    }

    #[test]
    fn test_normalizes_inner_parent() {
        let folder = ProjectFolder::temporary().unwrap();
        folder.write("a/../b.txt", "inside").unwrap();

        assert!(folder.path().join("b.txt").is_file());
        assert!(!folder.path().join("a").exists());
    }

    #[test]
    fn test_exists() {
        let folder = ProjectFolder::temporary().unwrap();
        folder.write("present.txt", "").unwrap();

        assert!(folder.exists("present.txt"));
        assert!(!folder.exists("absent.txt"));
        assert!(!folder.exists("../present.txt"));
    }

    #[test]
    fn test_temporary_folder_removed_on_drop() {
        let folder = ProjectFolder::temporary().unwrap();
        let path = folder.path().to_path_buf();
        assert!(path.is_dir());

        drop(folder);
        assert!(!path.exists());
    }

    #[test]
    fn test_bound_folder_not_removed_on_drop() {
        let dir = TempDir::new().unwrap();
        let folder = ProjectFolder::new(dir.path());
        folder.write("keep.txt", "kept").unwrap();
        drop(folder);

        assert!(dir.path().join("keep.txt").is_file());
    }
}
