//! Shared CLI presentation utilities.
//!
//! This module provides reusable display and formatting functions
//! for consistent CLI output across commands.
//!
//! # Guidelines
//!
//! - Keep this module format-only: no domain transforms
//! - Job control belongs in handlers; rendering of relay events lives here

pub mod media_display;
pub mod progress;
pub mod tables;

// Re-export commonly used items
pub use media_display::{display_history, display_metadata};
pub use progress::StatusPrinter;
pub use tables::{print_separator, truncate_string};
