//! Location of the persisted configuration document.

use std::path::PathBuf;

use super::error::PathError;
use super::platform::data_root;

/// File name of the configuration and history document.
pub const CONFIG_FILE_NAME: &str = "downloader_config.json";

/// Location of the configuration document under the data root.
pub fn config_file_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(CONFIG_FILE_NAME))
}
