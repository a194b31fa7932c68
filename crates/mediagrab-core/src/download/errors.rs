//! Job error types.
//!
//! These errors are designed to be serializable and not depend on external
//! error types like `std::io::Error`. For I/O errors, we capture the message
//! as a string.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for job submission, control and execution.
///
/// Submission errors (`InvalidRequest`, `ConcurrentJob`, `NoActiveJob`) are
/// returned synchronously to the caller. Execution errors (`Extraction`,
/// `Fetch`, `Aborted`) are produced by the media fetcher and end up as
/// notices on the event relay. `HistoryIo` is logged and never changes a
/// job's outcome.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum JobError {
    /// The request was rejected before any state transition.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// What was wrong with the request.
        message: String,
    },

    /// A job is already in flight.
    #[error("A download is already in progress ({active})")]
    ConcurrentJob {
        /// ID of the job occupying the slot.
        active: String,
    },

    /// Cancel was requested while no job is running.
    #[error("No download in progress")]
    NoActiveJob,

    /// Metadata extraction failed.
    #[error("Metadata extraction failed: {message}")]
    Extraction {
        /// Underlying cause.
        message: String,
    },

    /// Download or post-processing failed.
    #[error("Download failed: {message}")]
    Fetch {
        /// Underlying cause.
        message: String,
    },

    /// The fetch was aborted from the progress callback after a cancel.
    #[error("Download cancelled by user")]
    Aborted,

    /// Persisting the history document failed.
    #[error("History I/O error: {message}")]
    HistoryIo {
        /// Detailed error message.
        message: String,
    },
}

impl JobError {
    /// Create an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create a concurrent job error.
    pub fn concurrent_job(active: impl Into<String>) -> Self {
        Self::ConcurrentJob {
            active: active.into(),
        }
    }

    /// Create an extraction error.
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction {
            message: message.into(),
        }
    }

    /// Create a fetch error.
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Create a history I/O error.
    pub fn history_io(message: impl Into<String>) -> Self {
        Self::HistoryIo {
            message: message.into(),
        }
    }

    /// Create a history I/O error from a `std::io::Error`.
    #[must_use]
    pub fn from_io_error(err: &std::io::Error) -> Self {
        let kind = err.kind();
        Self::HistoryIo {
            message: format!("{kind:?}: {err}"),
        }
    }

    /// Check if this is a cooperative cancellation.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Aborted)
    }

    /// Check if this error was raised while submitting or controlling a job
    /// (as opposed to while running one).
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest { .. } | Self::ConcurrentJob { .. } | Self::NoActiveJob
        )
    }

    /// Title for an error or info dialog.
    #[must_use]
    pub const fn notice_title(&self) -> &'static str {
        match self {
            Self::Extraction { .. } => "Metadata error",
            Self::Fetch { .. } => "Download error",
            Self::Aborted => "Download cancelled",
            Self::HistoryIo { .. } => "History error",
            Self::InvalidRequest { .. } | Self::ConcurrentJob { .. } | Self::NoActiveJob => {
                "Error"
            }
        }
    }

    /// Convert to a user-friendly message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidRequest { message } => format!("Please check the request: {message}"),
            Self::ConcurrentJob { .. } => {
                "A download is still in progress. Wait for it to finish or cancel it.".to_string()
            }
            Self::NoActiveJob => "There is no download to cancel.".to_string(),
            Self::Extraction { message } => format!("Could not get media information: {message}"),
            Self::Fetch { message } => format!("Download error: {message}"),
            Self::Aborted => "The download was cancelled.".to_string(),
            Self::HistoryIo { message } => format!("Could not save download history: {message}"),
        }
    }
}
