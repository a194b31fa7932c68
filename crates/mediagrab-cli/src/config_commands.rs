//! Configuration management subcommands.

use clap::Subcommand;

/// Configuration management commands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show resolved paths and the configured downloads folder
    Show,
    /// Change the downloads folder (created if missing)
    SetDir {
        /// Path to the new downloads folder
        path: String,
    },
}
