//! Filesystem abstraction layer for testability
//!
//! The persistence codec talks to disk only through [`FileSystem`], so load
//! and save failure paths can be exercised with a mock in tests.

use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

#[cfg(test)]
use mockall::automock;

/// Trait abstracting the filesystem operations the data file needs.
#[cfg_attr(test, automock)]
pub trait FileSystem {
    /// Read file contents as a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Replace a file's contents in one step.
    ///
    /// Either the new contents are fully in place afterwards, or the
    /// previous file is left untouched.
    fn write_atomic(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// Real filesystem implementation using std::fs.
#[derive(Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn write_atomic(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        // Temp file in the target directory so the rename stays on one filesystem
        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut temp_file = NamedTempFile::new_in(parent)?;
        temp_file.write_all(contents)?;
        temp_file.as_file().sync_all()?;
        temp_file.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

static REAL_FS: RealFileSystem = RealFileSystem;

/// Get a reference to the global real filesystem instance.
pub fn real_fs() -> &'static RealFileSystem {
    &REAL_FS
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_real_fs_write_atomic_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("store.json");

        let fs = RealFileSystem;
        fs.write_atomic(&file_path, b"hello world").unwrap();

        assert_eq!(fs.read_to_string(&file_path).unwrap(), "hello world");
    }

    #[test]
    fn test_real_fs_write_atomic_replaces_contents() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("store.json");

        let fs = RealFileSystem;
        fs.write_atomic(&file_path, b"first version, longer").unwrap();
        fs.write_atomic(&file_path, b"second").unwrap();

        assert_eq!(fs.read_to_string(&file_path).unwrap(), "second");
    }

    #[test]
    fn test_real_fs_write_atomic_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("store.json");

        RealFileSystem.write_atomic(&file_path, b"{}").unwrap();

        let entries: Vec<_> = std::fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_real_fs_write_atomic_missing_dir_fails() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("missing/store.json");

        assert!(RealFileSystem.write_atomic(&file_path, b"{}").is_err());
        assert!(!file_path.exists());
    }

    #[test]
    fn test_real_fs_exists_and_create_dir_all() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir.path().join("a/b/c");

        let fs = RealFileSystem;
        assert!(!fs.exists(&nested_path));
        fs.create_dir_all(&nested_path).unwrap();
        assert!(fs.exists(&nested_path));
    }

    #[test]
    fn test_real_fs_read_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let result = RealFileSystem.read_to_string(&temp_dir.path().join("nope"));
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_mock_fs() {
        let mut mock_fs = MockFileSystem::new();
        mock_fs.expect_exists().returning(|_| true);
        mock_fs
            .expect_read_to_string()
            .returning(|_| Ok("mocked".to_string()));

        assert!(mock_fs.exists(Path::new("/any")));
        assert_eq!(mock_fs.read_to_string(Path::new("/any")).unwrap(), "mocked");
    }
}
