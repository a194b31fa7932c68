//! History store.
//!
//! Owns the persisted [`AppConfig`] document: the downloads folder and a
//! bounded log of completed downloads. Loading is tolerant (a missing,
//! unreadable or malformed file yields an empty document, and entries that
//! cannot be read are skipped), and every
//! mutation rewrites the whole file atomically.

mod io;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use mediagrab_core::download::JobError;
use mediagrab_core::paths::{PathError, config_file_path};
use mediagrab_core::ports::HistoryRepositoryPort;
use mediagrab_core::settings::{AppConfig, HistoryEntry};

use io::{read_document, write_document};

/// File-backed store for the configuration and history document.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    document: Mutex<AppConfig>,
}

impl HistoryStore {
    /// Load the document at `path`.
    ///
    /// Never fails: problems are logged and an empty document is used.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let document = match read_document(&path) {
            Ok(Some(document)) => {
                tracing::debug!(
                    path = %path.display(),
                    entries = document.history.len(),
                    "loaded history"
                );
                document
            }
            Ok(None) => {
                tracing::debug!(path = %path.display(), "no history file, starting empty");
                AppConfig::default()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable history file, starting empty");
                AppConfig::default()
            }
        };

        // A hand-edited file may hold more than the bound.
        let mut bounded = AppConfig {
            downloads_path: document.downloads_path,
            history: Vec::with_capacity(document.history.len()),
        };
        for entry in document.history {
            bounded.push_history(entry);
        }

        Self {
            path,
            document: Mutex::new(bounded),
        }
    }

    /// Load from the default location under the data root.
    pub fn load_default() -> Result<Self, PathError> {
        Ok(Self::load(config_file_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy of the whole document.
    pub fn snapshot(&self) -> AppConfig {
        self.lock().clone()
    }

    /// The configured downloads folder, as stored.
    pub fn downloads_path(&self) -> String {
        self.lock().downloads_path.clone()
    }

    /// Change the downloads folder and persist, keeping the history.
    pub fn set_downloads_path(&self, downloads_path: impl Into<String>) -> Result<(), JobError> {
        let mut document = self.lock();
        document.downloads_path = downloads_path.into();
        self.persist(&document)
    }

    fn persist(&self, document: &AppConfig) -> Result<(), JobError> {
        write_document(&self.path, document).map_err(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to write history");
            JobError::from_io_error(&e)
        })
    }

    fn lock(&self) -> MutexGuard<'_, AppConfig> {
        self.document.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HistoryRepositoryPort for HistoryStore {
    fn append(&self, entry: HistoryEntry) -> Result<(), JobError> {
        let mut document = self.lock();
        document.push_history(entry);
        self.persist(&document)
    }

    fn recent(&self, n: usize) -> Vec<HistoryEntry> {
        self.lock().recent_history(n)
    }

    fn len(&self) -> usize {
        self.lock().history.len()
    }
}
