//! Locating the yt-dlp executable.

use std::path::PathBuf;

use thiserror::Error;

/// Environment variable naming the yt-dlp executable.
pub const YT_DLP_ENV: &str = "MEDIAGRAB_YT_DLP";

const CANDIDATES: &[&str] = &["yt-dlp", "yt_dlp"];

#[derive(Error, Debug)]
pub enum FetcherSetupError {
    #[error("yt-dlp not found on PATH (tried: {0}); install it or set {YT_DLP_ENV}")]
    NotFound(String),

    #[error("yt-dlp binary {0} does not exist")]
    Missing(PathBuf),
}

/// Fetcher configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetcherConfig {
    /// Explicit path to the executable; `None` searches `PATH`.
    pub binary: Option<PathBuf>,
}

impl FetcherConfig {
    /// Resolve the executable path.
    pub fn locate(&self) -> Result<PathBuf, FetcherSetupError> {
        if let Some(path) = &self.binary {
            // A bare name is looked up on PATH like the default.
            if path.components().count() == 1 {
                if let Ok(found) = which::which(path) {
                    return Ok(found);
                }
            }
            return if path.exists() {
                Ok(path.clone())
            } else {
                Err(FetcherSetupError::Missing(path.clone()))
            };
        }

        for candidate in CANDIDATES {
            if let Ok(path) = which::which(candidate) {
                return Ok(path);
            }
        }
        Err(FetcherSetupError::NotFound(CANDIDATES.join(", ")))
    }
}
