//! Main commands enum and primary subcommands.

use clap::Subcommand;

use mediagrab_core::download::{JobError, MediaType};

use crate::config_commands::ConfigCommand;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Download a video or extract its audio
    Download {
        /// Page URL of the media
        url: String,
        /// Output type: mp4, mp3, m4a or mkv
        #[arg(short, long, default_value = "mp4", value_parser = parse_media_type)]
        format: MediaType,
        /// Quality preset, e.g. "best", "720p", "192k" (see `formats`)
        #[arg(short, long)]
        quality: Option<String>,
        /// Target directory (defaults to the configured downloads folder)
        #[arg(short, long)]
        dir: Option<String>,
    },

    /// Show title, channel, duration and views without downloading
    Info {
        /// Page URL of the media
        url: String,
    },

    /// Show recently completed downloads, newest first
    History {
        /// Number of entries to show
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Show or change the configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Open the downloads folder in the system file manager
    Open {
        /// Folder to open instead of the configured one
        path: Option<String>,
    },

    /// List output types and their quality presets
    Formats,
}

fn parse_media_type(raw: &str) -> Result<MediaType, String> {
    raw.parse().map_err(|e: JobError| e.to_string())
}
