//! Persisted application document: downloads folder and download history.
//!
//! These are pure domain types with no infrastructure dependencies. The
//! on-disk layout is:
//!
//! ```json
//! {
//!   "downloads_path": "downloads",
//!   "history": [ { "date": "18/10/2026 14:05", "title": "...", "format": "AudioMp3" } ]
//! }
//! ```

use chrono::{DateTime, Local, TimeZone};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::download::MediaType;

/// Maximum number of history entries kept on disk.
pub const HISTORY_CAPACITY: usize = 50;

/// Downloads folder used when the document does not name one.
pub const DEFAULT_DOWNLOADS_PATH: &str = "downloads";

/// Timestamp layout used in history entries.
pub const HISTORY_DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// A completed download as recorded in the history log.
///
/// Missing keys load as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryEntry {
    /// Local completion time, `dd/mm/YYYY HH:MM`.
    pub date: String,
    pub title: String,
    /// Media type label, e.g. `VideoContainer`.
    pub format: String,
}

impl HistoryEntry {
    pub fn new(date: impl Into<String>, title: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            title: title.into(),
            format: format.into(),
        }
    }

    /// Build an entry for a job that completed at `at`.
    pub fn completed_at<Tz: TimeZone>(at: &DateTime<Tz>, title: impl Into<String>, media_type: MediaType) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self::new(
            at.format(HISTORY_DATE_FORMAT).to_string(),
            title,
            media_type.label(),
        )
    }

    /// Build an entry for a job completing now (local time).
    pub fn completed_now(title: impl Into<String>, media_type: MediaType) -> Self {
        Self::completed_at(&Local::now(), title, media_type)
    }
}

/// The whole persisted document.
///
/// Missing keys fall back to defaults so older or hand-edited files load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub downloads_path: String,
    /// Completion order, oldest first.
    #[serde(deserialize_with = "deserialize_history")]
    pub history: Vec<HistoryEntry>,
}

/// Keep every entry that parses; drop the rest instead of failing the document.
fn deserialize_history<'de, D>(deserializer: D) -> Result<Vec<HistoryEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StoredEntry {
        Entry(HistoryEntry),
        Unreadable(#[allow(dead_code)] IgnoredAny),
    }

    let stored = Option::<Vec<StoredEntry>>::deserialize(deserializer)?;
    Ok(stored
        .unwrap_or_default()
        .into_iter()
        .filter_map(|item| match item {
            StoredEntry::Entry(entry) => Some(entry),
            StoredEntry::Unreadable(_) => None,
        })
        .collect())
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            downloads_path: DEFAULT_DOWNLOADS_PATH.to_string(),
            history: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Append an entry and evict the oldest ones beyond [`HISTORY_CAPACITY`].
    pub fn push_history(&mut self, entry: HistoryEntry) {
        self.history.push(entry);
        if self.history.len() > HISTORY_CAPACITY {
            let excess = self.history.len() - HISTORY_CAPACITY;
            self.history.drain(..excess);
        }
    }

    /// The last `n` entries, most recent first.
    #[must_use]
    pub fn recent_history(&self, n: usize) -> Vec<HistoryEntry> {
        self.history.iter().rev().take(n).cloned().collect()
    }
}
