//! Directory creation and verification.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use super::error::PathError;

/// Strategy for handling a missing directory in [`ensure_directory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectoryCreationStrategy {
    /// Create directories automatically if they are missing.
    #[default]
    AutoCreate,
    /// Return an error if the directory is missing.
    Disallow,
}

/// Ensure `path` exists as a writable directory.
pub fn ensure_directory(path: &Path, strategy: DirectoryCreationStrategy) -> Result<(), PathError> {
    if path.exists() {
        if !path.is_dir() {
            return Err(PathError::NotADirectory(path.to_path_buf()));
        }
    } else {
        match strategy {
            DirectoryCreationStrategy::AutoCreate => {
                fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?;
            }
            DirectoryCreationStrategy::Disallow => {
                return Err(PathError::DirectoryNotFound(path.to_path_buf()));
            }
        }
    }

    verify_writable(path)
}

/// Verify a directory is writable by creating and removing a probe file.
pub fn verify_writable(path: &Path) -> Result<(), PathError> {
    let probe = path.join(".mediagrab_write_test");
    let not_writable = |e: std::io::Error| PathError::NotWritable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&probe)
        .map_err(not_writable)?;
    file.write_all(b"ok").map_err(not_writable)?;
    drop(file);
    let _ = fs::remove_file(&probe);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_auto_create_makes_nested_dirs() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("a").join("b");
        ensure_directory(&target, DirectoryCreationStrategy::AutoCreate).unwrap();
        assert!(target.is_dir());
        assert!(!target.join(".mediagrab_write_test").exists());
    }

    #[test]
    fn test_disallow_reports_missing() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("missing");
        let err = ensure_directory(&target, DirectoryCreationStrategy::Disallow).unwrap_err();
        assert!(matches!(err, PathError::DirectoryNotFound(_)));
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        let err = ensure_directory(&file, DirectoryCreationStrategy::AutoCreate).unwrap_err();
        assert!(matches!(err, PathError::NotADirectory(_)));
    }
}
