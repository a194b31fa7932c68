//! Media fetcher port.
//!
//! The fetcher is the only component that touches the network or runs
//! transcoders. The controller drives it through two calls: a metadata-only
//! extraction, then the fetch itself with a progress callback.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::download::{FormatPlan, JobError, MediaMetadata, RawProgress};

/// Progress callback handed to [`MediaFetcherPort::fetch`].
///
/// Returning `Err(JobError::Aborted)` asks the fetcher to stop; it is then
/// expected to return `Err(JobError::Aborted)` itself.
pub type ProgressCallback = Box<dyn Fn(RawProgress) -> Result<(), JobError> + Send + Sync>;

/// Everything the fetcher needs to produce the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    pub url: String,
    /// Existing, absolute output directory.
    pub target_dir: PathBuf,
    pub plan: FormatPlan,
}

/// Result of a successful fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchOutcome {
    /// Title of the produced media, if the fetcher reports one.
    pub final_title: Option<String>,
}

/// Port for extracting metadata and fetching media.
#[async_trait]
pub trait MediaFetcherPort: Send + Sync {
    /// Extract metadata without downloading.
    ///
    /// Failures map to `JobError::Extraction`.
    async fn extract_metadata(&self, url: &str) -> Result<MediaMetadata, JobError>;

    /// Download and post-process, invoking `on_progress` as the fetch
    /// advances.
    ///
    /// Failures map to `JobError::Fetch`, or `JobError::Aborted` when the
    /// callback asked to stop.
    async fn fetch(
        &self,
        request: &FetchRequest,
        on_progress: &ProgressCallback,
    ) -> Result<FetchOutcome, JobError>;
}
