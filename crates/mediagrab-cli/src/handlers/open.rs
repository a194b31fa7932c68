//! Open handler: show the downloads folder in the platform file manager.

use std::path::Path;
use std::process::Command;

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;

#[cfg(target_os = "macos")]
const OPENER: &str = "open";
#[cfg(target_os = "windows")]
const OPENER: &str = "explorer";
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const OPENER: &str = "xdg-open";

/// Execute the open command.
pub fn execute(ctx: &CliContext, path: Option<&str>) -> Result<()> {
    let folder = ctx.downloads_dir(path)?.path;
    open_folder(&folder)?;
    println!("Opened {}", folder.display());
    Ok(())
}

fn open_folder(folder: &Path) -> Result<(), CliError> {
    tracing::debug!(opener = OPENER, folder = %folder.display(), "opening folder");
    Command::new(OPENER)
        .arg(folder)
        .spawn()
        .map(drop)
        .map_err(|e| CliError::Process(format!("failed to run {OPENER}: {e}")))
}
