//! Downloads directory resolution.
//!
//! Resolves the folder finished files land in from an explicit path, an
//! environment variable, or the value stored in the configuration document.

use std::env;
use std::path::PathBuf;

use super::error::PathError;
use super::platform::normalize_user_path;
use crate::settings::DEFAULT_DOWNLOADS_PATH;

/// Environment variable overriding the configured downloads folder.
pub const DOWNLOADS_DIR_ENV: &str = "MEDIAGRAB_DOWNLOADS_DIR";

/// How the downloads directory was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadsDirSource {
    /// The user passed an explicit path (e.g., `--dir`).
    Explicit,
    /// `MEDIAGRAB_DOWNLOADS_DIR`.
    EnvVar,
    /// `downloads_path` from the configuration document.
    Config,
}

/// Resolution result for the downloads directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadsDirResolution {
    /// Absolute path; may not exist yet.
    pub path: PathBuf,
    pub source: DownloadsDirSource,
}

/// The downloads folder used when nothing is configured, relative to the
/// current directory.
pub fn default_downloads_dir() -> Result<PathBuf, PathError> {
    normalize_user_path(DEFAULT_DOWNLOADS_PATH)
}

/// Resolve the downloads directory.
///
/// Resolution order:
/// 1. Explicit path provided by caller
/// 2. `MEDIAGRAB_DOWNLOADS_DIR` environment variable
/// 3. `configured`, the document's `downloads_path`
pub fn resolve_downloads_dir(
    explicit: Option<&str>,
    configured: &str,
) -> Result<DownloadsDirResolution, PathError> {
    if let Some(path_str) = explicit {
        return Ok(DownloadsDirResolution {
            path: normalize_user_path(path_str)?,
            source: DownloadsDirSource::Explicit,
        });
    }

    if let Ok(env_path) = env::var(DOWNLOADS_DIR_ENV) {
        if !env_path.trim().is_empty() {
            return Ok(DownloadsDirResolution {
                path: normalize_user_path(&env_path)?,
                source: DownloadsDirSource::EnvVar,
            });
        }
    }

    Ok(DownloadsDirResolution {
        path: normalize_user_path(configured)?,
        source: DownloadsDirSource::Config,
    })
}
