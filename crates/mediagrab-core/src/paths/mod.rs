//! Path utilities for mediagrab data directories and user-configurable locations.
//!
//! - Data root and the configuration document
//! - Downloads directory
//!
//! Returns `PathBuf` and `PathError`; no interactive prompts here.

mod config;
mod downloads;
mod ensure;
mod error;
mod platform;
mod resolver;

#[cfg(test)]
mod test_utils;

pub use error::PathError;

pub use platform::{DATA_DIR_ENV, data_root, normalize_user_path};

pub use config::{CONFIG_FILE_NAME, config_file_path};

pub use downloads::{
    DOWNLOADS_DIR_ENV, DownloadsDirResolution, DownloadsDirSource, default_downloads_dir,
    resolve_downloads_dir,
};

pub use ensure::{DirectoryCreationStrategy, ensure_directory, verify_writable};

pub use resolver::ResolvedPaths;
