//! File store port and its local filesystem adapter

use crate::error::{Error, Result};
use std::io;
use std::path::Path;

/// Filesystem primitives the installer and detection depend on
pub trait FileStore {
    /// Create a directory and all missing parents. Existing directories are fine.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Read a UTF-8 file. A missing file is `Ok(None)`, not an error.
    fn read_to_string(&self, path: &Path) -> Result<Option<String>>;

    /// Create or overwrite a file
    fn write(&self, path: &Path, content: &str) -> Result<()>;

    fn exists(&self, path: &Path) -> bool;
}

/// [`FileStore`] backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileStore for LocalFs {
    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path).map_err(|e| Error::fs("create directory", path, e))
    }

    fn read_to_string(&self, path: &Path) -> Result<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::fs("read", path, e)),
        }
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        std::fs::write(path, content).map_err(|e| Error::fs("write", path, e))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFs;
        assert_eq!(store.read_to_string(&dir.path().join("nope.txt")).unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFs;
        let nested = dir.path().join("a/b");
        store.create_dir_all(&nested).unwrap();
        store.create_dir_all(&nested).unwrap();

        let file = nested.join("file.txt");
        store.write(&file, "hello").unwrap();
        assert!(store.exists(&file));
        assert_eq!(store.read_to_string(&file).unwrap().as_deref(), Some("hello"));
    }

    #[test]
    fn test_write_into_missing_directory_is_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocalFs
            .write(&dir.path().join("missing/file.txt"), "x")
            .unwrap_err();
        assert!(matches!(err, Error::Filesystem { action: "write", .. }));
    }
}
