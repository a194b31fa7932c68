//! Raw and normalized progress payloads.

use serde::{Deserialize, Serialize};

/// Status reported by the media fetcher for a raw progress callback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawStatus {
    #[default]
    Downloading,
    /// A stream finished downloading; post-processing may follow.
    Finished,
    /// A post-processor (merge, audio extraction) is running.
    Processing,
    Error,
}

/// Heterogeneous progress payload as reported by the media fetcher.
///
/// Any field may be missing; totals in particular are often absent for
/// live or fragmented streams.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawProgress {
    pub status: RawStatus,
    pub downloaded_bytes: Option<u64>,
    pub total_bytes: Option<u64>,
    pub total_bytes_estimate: Option<u64>,
    /// Pre-formatted percentage, e.g. `" 45.2%"`.
    pub percent_str: Option<String>,
    pub total_bytes_str: Option<String>,
    pub speed_str: Option<String>,
    pub eta_str: Option<String>,
    pub filename: Option<String>,
    /// Name of the running post-processor, for `Processing`.
    pub postprocessor: Option<String>,
}

impl RawProgress {
    /// A downloading payload with byte counts.
    #[must_use]
    pub fn downloading(downloaded: u64, total: Option<u64>) -> Self {
        Self {
            status: RawStatus::Downloading,
            downloaded_bytes: Some(downloaded),
            total_bytes: total,
            ..Self::default()
        }
    }

    /// A downloading payload that only carries a formatted percentage.
    pub fn percent_only(percent_str: impl Into<String>) -> Self {
        Self {
            status: RawStatus::Downloading,
            percent_str: Some(percent_str.into()),
            ..Self::default()
        }
    }

    /// A stream-finished payload.
    #[must_use]
    pub fn finished(filename: Option<String>) -> Self {
        Self {
            status: RawStatus::Finished,
            filename,
            ..Self::default()
        }
    }

    /// A post-processing payload.
    pub fn processing(postprocessor: impl Into<String>) -> Self {
        Self {
            status: RawStatus::Processing,
            postprocessor: Some(postprocessor.into()),
            ..Self::default()
        }
    }

    /// An error payload.
    #[must_use]
    pub fn error(filename: Option<String>) -> Self {
        Self {
            status: RawStatus::Error,
            filename,
            ..Self::default()
        }
    }

    /// Total size, preferring the exact value over the estimate.
    #[must_use]
    pub fn total(&self) -> Option<u64> {
        self.total_bytes.or(self.total_bytes_estimate)
    }
}

/// Phase of a normalized progress event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressPhase {
    Downloading,
    /// The fetch is logically done; emitted once per job.
    Finished,
    /// Post-processing after the finished signal; percent stays at 100.
    Processing,
    /// Informational only; job failure is decided by the fetcher's result.
    Error,
}

/// Uniform progress event derived from a raw payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub phase: ProgressPhase,
    /// Whole percent in `0..=100`, or `None` when unknown.
    pub percent: Option<u8>,
    pub message: String,
}
