//! All resolved locations captured in one struct, for `config show`.

use std::path::PathBuf;

use super::{DownloadsDirSource, PathError, config_file_path, data_root, resolve_downloads_dir};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub data_root: PathBuf,
    pub config_file: PathBuf,
    pub downloads_dir: PathBuf,
    pub downloads_source: DownloadsDirSource,
}

impl ResolvedPaths {
    /// Resolve every location against the current environment and the
    /// configured downloads folder.
    pub fn resolve(configured_downloads: &str) -> Result<Self, PathError> {
        let downloads = resolve_downloads_dir(None, configured_downloads)?;
        Ok(Self {
            data_root: data_root()?,
            config_file: config_file_path()?,
            downloads_dir: downloads.path,
            downloads_source: downloads.source,
        })
    }
}
