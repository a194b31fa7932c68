//! Config command handler.
//!
//! Shows resolved locations and changes the persisted downloads folder.

use anyhow::Result;

use mediagrab_core::paths::{
    DirectoryCreationStrategy, ResolvedPaths, default_downloads_dir, ensure_directory,
    resolve_downloads_dir, verify_writable,
};
use mediagrab_core::ports::HistoryRepositoryPort;

use crate::bootstrap::CliContext;
use crate::config_commands::ConfigCommand;
use crate::error::CliError;

/// Execute the config command.
pub fn execute(ctx: &CliContext, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => handle_show(ctx),
        ConfigCommand::SetDir { path } => handle_set_dir(ctx, &path),
    }
}

fn handle_show(ctx: &CliContext) -> Result<()> {
    let history = ctx.history();
    let configured = history.downloads_path();
    let paths = ResolvedPaths::resolve(&configured).map_err(CliError::from)?;

    println!("data_root = {}", paths.data_root.display());
    println!("config_file = {}", history.path().display());
    println!("downloads_path = {configured}");
    println!(
        "downloads_dir = {} (source: {:?})",
        paths.downloads_dir.display(),
        paths.downloads_source
    );
    println!(
        "default_downloads_dir = {}",
        default_downloads_dir().map_err(CliError::from)?.display()
    );
    println!("history_entries = {}", history.len());
    Ok(())
}

fn handle_set_dir(ctx: &CliContext, raw: &str) -> Result<()> {
    let history = ctx.history();
    let resolved = resolve_downloads_dir(Some(raw), &history.downloads_path())
        .map_err(CliError::from)?;
    ensure_directory(&resolved.path, DirectoryCreationStrategy::AutoCreate)
        .map_err(CliError::from)?;
    verify_writable(&resolved.path).map_err(CliError::from)?;

    history
        .set_downloads_path(resolved.path.to_string_lossy())
        .map_err(CliError::from)?;
    println!("✓ Downloads folder set to {}", resolved.path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::{CliConfig, bootstrap};
    use mediagrab_download::HistoryStore;
    use tempfile::tempdir;

    #[test]
    fn test_set_dir_persists_and_creates_folder() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("downloader_config.json");
        let ctx = bootstrap(CliConfig {
            config_path: Some(config_path.clone()),
            yt_dlp: None,
        })
        .unwrap();
        let target = dir.path().join("media");

        handle_set_dir(&ctx, target.to_str().unwrap()).unwrap();

        assert!(target.is_dir());
        let reloaded = HistoryStore::load(&config_path);
        assert_eq!(reloaded.downloads_path(), target.to_string_lossy());
    }
}
