//! UI events - discriminated union for everything the worker reports.

use serde::{Deserialize, Serialize};

use super::progress::ProgressEvent;
use super::types::MediaMetadata;

/// Single discriminated union for all events delivered to the UI surface.
///
/// Wire format uses a `type` tag:
///
/// ```json
/// { "type": "status_update", "message": "Downloading: 45.0%", "percent": 45 }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// Status line, optionally with a progress percentage.
    StatusUpdate {
        message: String,
        /// Whole percent in `0..=100`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        percent: Option<u8>,
    },

    /// A line for the activity log.
    LogLine {
        text: String,
    },

    /// An error dialog.
    ErrorNotice {
        title: String,
        message: String,
    },

    /// An informational dialog.
    InfoNotice {
        title: String,
        message: String,
    },

    /// Metadata extracted for the running job.
    MetadataUpdate {
        metadata: MediaMetadata,
    },
}

impl UiEvent {
    /// Create a status update event.
    pub fn status(message: impl Into<String>, percent: Option<u8>) -> Self {
        Self::StatusUpdate {
            message: message.into(),
            percent,
        }
    }

    /// Create a log line event.
    pub fn log(text: impl Into<String>) -> Self {
        Self::LogLine { text: text.into() }
    }

    /// Create an error notice event.
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ErrorNotice {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Create an info notice event.
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InfoNotice {
            title: title.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn metadata(metadata: MediaMetadata) -> Self {
        Self::MetadataUpdate { metadata }
    }

    /// Status update carrying a normalized progress event.
    #[must_use]
    pub fn from_progress(event: ProgressEvent) -> Self {
        Self::StatusUpdate {
            message: event.message,
            percent: event.percent,
        }
    }

    /// Get the event name for wire protocols.
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::StatusUpdate { .. } => "job:status",
            Self::LogLine { .. } => "job:log",
            Self::ErrorNotice { .. } => "job:error",
            Self::InfoNotice { .. } => "job:info",
            Self::MetadataUpdate { .. } => "job:metadata",
        }
    }
}
