//! Display helpers for metadata and history.

use mediagrab_core::download::MediaMetadata;
use mediagrab_core::settings::HistoryEntry;

use super::tables::{print_separator, truncate_string};

const TITLE_WIDTH: usize = 50;

/// Print the metadata summary shown by `info` and at download start.
pub fn display_metadata(metadata: &MediaMetadata) {
    for line in metadata.summary().lines() {
        println!("  {line}");
    }
}

/// Print history entries (already ordered newest first) as a table.
pub fn display_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("No downloads yet.");
        return;
    }

    println!("{:<16}  {:<14}  {}", "Date", "Format", "Title");
    print_separator(16 + 2 + 14 + 2 + TITLE_WIDTH);
    for entry in entries {
        println!("{}", history_row(entry));
    }
}

fn history_row(entry: &HistoryEntry) -> String {
    format!(
        "{:<16}  {:<14}  {}",
        entry.date,
        entry.format,
        truncate_string(&entry.title, TITLE_WIDTH)
    )
}
