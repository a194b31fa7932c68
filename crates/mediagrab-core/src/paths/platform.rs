//! Platform-specific path resolution.

use std::env;
use std::fs;
use std::path::PathBuf;

use super::error::PathError;

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = "MEDIAGRAB_DATA_DIR";

/// Get the root directory for application data (config and history).
///
/// Resolution order:
/// 1. `MEDIAGRAB_DATA_DIR` environment variable
/// 2. System data directory (e.g., `~/.local/share/mediagrab`)
pub fn data_root() -> Result<PathBuf, PathError> {
    if let Ok(path) = env::var(DATA_DIR_ENV) {
        if !path.trim().is_empty() {
            return normalize_user_path(&path);
        }
    }

    let root = dirs::data_local_dir()
        .ok_or(PathError::NoDataDir)?
        .join("mediagrab");

    if !root.exists() {
        fs::create_dir_all(&root).map_err(|e| PathError::CreateFailed {
            path: root.clone(),
            reason: e.to_string(),
        })?;
    }

    Ok(root)
}

/// Normalize a user-provided path, expanding `~` and making it absolute.
///
/// Relative paths are resolved against the current working directory.
pub fn normalize_user_path(raw: &str) -> Result<PathBuf, PathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathError::EmptyPath);
    }

    let expanded = match trimmed.strip_prefix('~') {
        Some("") => dirs::home_dir().ok_or(PathError::NoHomeDir)?,
        Some(rest) if rest.starts_with('/') => dirs::home_dir()
            .ok_or(PathError::NoHomeDir)?
            .join(rest.trim_start_matches('/')),
        _ => PathBuf::from(trimmed),
    };

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(expanded))
            .map_err(|e| PathError::CurrentDirError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::test_utils::{ENV_LOCK, EnvVarGuard};

    #[test]
    fn test_normalize_rejects_empty() {
        assert!(matches!(normalize_user_path("   "), Err(PathError::EmptyPath)));
    }

    #[test]
    fn test_normalize_makes_relative_absolute() {
        let path = normalize_user_path("downloads").unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("downloads"));
    }

    #[test]
    fn test_normalize_expands_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(normalize_user_path("~").unwrap(), home);
            assert_eq!(normalize_user_path("~/Music").unwrap(), home.join("Music"));
        }
    }

    #[test]
    fn test_data_root_env_override() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _env = EnvVarGuard::set(DATA_DIR_ENV, "/tmp/mediagrab-test-root");
        assert_eq!(data_root().unwrap(), PathBuf::from("/tmp/mediagrab-test-root"));
    }
}
