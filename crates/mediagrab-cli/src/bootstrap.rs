//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - History store (configuration document on disk)
//! - yt-dlp fetcher (located lazily, only for commands that need it)
//! - Job controller and event relay (per download)

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::runtime::Handle;

use mediagrab_core::paths::{
    DirectoryCreationStrategy, DownloadsDirResolution, ensure_directory, resolve_downloads_dir,
};
use mediagrab_download::{
    EventReceiver, EventRelay, FetcherConfig, HistoryStore, JobController, JobControllerDeps,
    YtDlpFetcher, build_job_controller,
};

use crate::error::CliError;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Configuration/history document; `None` uses the data root.
    pub config_path: Option<PathBuf>,
    /// yt-dlp executable; `None` searches `PATH`.
    pub yt_dlp: Option<PathBuf>,
}

/// Composed application context for CLI commands.
pub struct CliContext {
    history: Arc<HistoryStore>,
    fetcher_config: FetcherConfig,
}

impl CliContext {
    pub fn history(&self) -> &Arc<HistoryStore> {
        &self.history
    }

    /// Locate yt-dlp and build the fetcher.
    pub fn fetcher(&self) -> Result<Arc<YtDlpFetcher>, CliError> {
        Ok(Arc::new(YtDlpFetcher::from_config(&self.fetcher_config)?))
    }

    /// Resolve the downloads folder (explicit, env, then configured) and
    /// create it if missing.
    pub fn downloads_dir(&self, explicit: Option<&str>) -> Result<DownloadsDirResolution, CliError> {
        let resolved = resolve_downloads_dir(explicit, &self.history.downloads_path())?;
        ensure_directory(&resolved.path, DirectoryCreationStrategy::AutoCreate)?;
        Ok(resolved)
    }

    /// Build a job controller wired to a fresh event relay.
    pub fn job_controller(&self) -> Result<(JobController, EventReceiver), CliError> {
        let (relay, events) = EventRelay::channel();
        let controller = build_job_controller(JobControllerDeps {
            fetcher: self.fetcher()?,
            history: self.history.clone(),
            emitter: Arc::new(relay),
            runtime: Handle::current(),
        });
        Ok((controller, events))
    }
}

/// Bootstrap the CLI application.
///
/// Loads the configuration document (tolerantly) from the given path or
/// the default location under the data root.
pub fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let history = match config.config_path {
        Some(path) => HistoryStore::load(path),
        None => HistoryStore::load_default().map_err(CliError::from)?,
    };
    tracing::debug!(path = %history.path().display(), "configuration loaded");

    Ok(CliContext {
        history: Arc::new(history),
        fetcher_config: FetcherConfig {
            binary: config.yt_dlp,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediagrab_core::paths::DownloadsDirSource;
    use mediagrab_core::ports::HistoryRepositoryPort;
    use tempfile::tempdir;

    fn context_in(dir: &std::path::Path) -> CliContext {
        bootstrap(CliConfig {
            config_path: Some(dir.join("downloader_config.json")),
            yt_dlp: None,
        })
        .unwrap()
    }

    #[test]
    fn test_bootstrap_with_missing_document_is_empty() {
        let dir = tempdir().unwrap();
        let ctx = context_in(dir.path());
        assert!(ctx.history().is_empty());
        assert_eq!(ctx.history().downloads_path(), "downloads");
    }

    #[test]
    fn test_explicit_downloads_dir_is_created() {
        let dir = tempdir().unwrap();
        let ctx = context_in(dir.path());
        let target = dir.path().join("out").join("nested");

        let resolved = ctx.downloads_dir(Some(target.to_str().unwrap())).unwrap();
        assert_eq!(resolved.source, DownloadsDirSource::Explicit);
        assert!(target.is_dir());
    }

    #[test]
    fn test_missing_yt_dlp_is_a_process_error() {
        let dir = tempdir().unwrap();
        let ctx = bootstrap(CliConfig {
            config_path: Some(dir.path().join("cfg.json")),
            yt_dlp: Some(dir.path().join("missing").join("yt-dlp")),
        })
        .unwrap();
        let err = ctx.fetcher().unwrap_err();
        assert!(matches!(err, CliError::Process(_)));
    }
}
