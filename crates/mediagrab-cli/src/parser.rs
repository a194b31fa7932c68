//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for downloading online video and audio.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "mediagrab")]
#[command(about = "Download video and audio from the web with yt-dlp")]
#[command(version)]
pub struct Cli {
    /// Use this configuration/history document instead of the default one
    #[arg(long = "config", global = true, env = "MEDIAGRAB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path or name of the yt-dlp executable
    #[arg(long = "yt-dlp", global = true, env = "MEDIAGRAB_YT_DLP")]
    pub yt_dlp: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigCommand;
    use clap::CommandFactory;
    use mediagrab_core::download::MediaType;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "mediagrab",
            "--verbose",
            "--config",
            "/tmp/cfg.json",
            "history",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/cfg.json")));
        assert!(matches!(cli.command, Some(Commands::History { limit: 10 })));
    }

    #[test]
    fn test_download_defaults_to_mp4() {
        let cli = Cli::parse_from(["mediagrab", "download", "https://example.com/v"]);
        match cli.command {
            Some(Commands::Download {
                url,
                format,
                quality,
                dir,
            }) => {
                assert_eq!(url, "https://example.com/v");
                assert_eq!(format, MediaType::VideoContainer);
                assert!(quality.is_none());
                assert!(dir.is_none());
            }
            _ => panic!("expected download command"),
        }
    }

    #[test]
    fn test_download_with_audio_format() {
        let cli = Cli::parse_from([
            "mediagrab",
            "download",
            "https://example.com/v",
            "--format",
            "mp3",
            "--quality",
            "128k",
            "--dir",
            "/tmp/out",
        ]);
        let Some(Commands::Download {
            format,
            quality,
            dir,
            ..
        }) = cli.command
        else {
            panic!("expected download command");
        };
        assert_eq!(format, MediaType::AudioMp3);
        assert_eq!(quality.as_deref(), Some("128k"));
        assert_eq!(dir.as_deref(), Some("/tmp/out"));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result = Cli::try_parse_from(["mediagrab", "download", "u", "--format", "flac"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_set_dir() {
        let cli = Cli::parse_from(["mediagrab", "config", "set-dir", "~/Videos"]);
        let Some(Commands::Config {
            command: ConfigCommand::SetDir { path },
        }) = cli.command
        else {
            panic!("expected config set-dir");
        };
        assert_eq!(path, "~/Videos");
    }
}
