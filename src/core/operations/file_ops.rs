use std::fs;
use std::path::Path;

use tracing::{debug, error};

/// Result type for file operations
pub type FileOpResult<T> = Result<T, FileOpError>;

/// Error types for file operations
#[derive(Debug)]
pub enum FileOpError {
    CopyFailed(String),
    CreateDirFailed(String),
    IoError(std::io::Error),
}

impl std::fmt::Display for FileOpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileOpError::CopyFailed(msg) => write!(f, "Copy failed: {}", msg),
            FileOpError::CreateDirFailed(msg) => write!(f, "Create directory failed: {}", msg),
            FileOpError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for FileOpError {}

impl From<std::io::Error> for FileOpError {
    fn from(error: std::io::Error) -> Self {
        FileOpError::IoError(error)
    }
}

/// Copy a file from source to destination. The source is left untouched.
///
/// # Arguments
/// * `src` - Source file path
/// * `dest` - Destination file path
///
/// # Returns
/// * `Ok(())` if successful
/// * `Err(FileOpError)` if the copy failed
pub fn copy_file(src: &Path, dest: &Path) -> FileOpResult<()> {
    debug!("Copying file from {:?} to {:?}", src, dest);

    if let Err(e) = fs::copy(src, dest) {
        error!("Failed to copy file from {:?} to {:?}: {}", src, dest, e);
        return Err(FileOpError::CopyFailed(format!(
            "Failed to copy from {:?} to {:?}: {}",
            src, dest, e
        )));
    }

    Ok(())
}

/// Create a directory and its parents if they do not exist yet.
/// An already existing directory is not an error, so concurrent callers
/// creating the same path are safe.
pub fn ensure_dir(path: &Path) -> FileOpResult<()> {
    if let Err(e) = fs::create_dir_all(path) {
        error!("Failed to create directory {:?}: {}", path, e);
        return Err(FileOpError::CreateDirFailed(format!(
            "Failed to create directory {:?}: {}",
            path, e
        )));
    }
    Ok(())
}

/// Check whether a directory contains no entries at all.
pub fn dir_is_empty(path: &Path) -> FileOpResult<bool> {
    let mut entries = fs::read_dir(path)?;
    Ok(entries.next().is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_copy_file_preserves_source() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("a.jpg");
        let dest = tmp.path().join("b.jpg");
        let mut f = File::create(&src).unwrap();
        f.write_all(b"pixels").unwrap();

        copy_file(&src, &dest).unwrap();

        assert!(src.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"pixels");
    }

    #[test]
    fn test_copy_file_missing_source_fails() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("missing.jpg");
        let dest = tmp.path().join("out.jpg");
        let err = copy_file(&src, &dest).unwrap_err();
        assert!(matches!(err, FileOpError::CopyFailed(_)));
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("train").join("potato");
        ensure_dir(&dir).unwrap();
        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(dir_is_empty(tmp.path()).unwrap());
        File::create(tmp.path().join("x")).unwrap();
        assert!(!dir_is_empty(tmp.path()).unwrap());
    }
}
