//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from `JobError` and setup errors to exit codes.

use mediagrab_core::download::JobError;
use mediagrab_core::paths::PathError;
use mediagrab_download::FetcherSetupError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The download or metadata extraction failed.
    #[error("{0}")]
    Download(String),

    /// Argument or request validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Another download holds the job slot.
    #[error("{0}")]
    Busy(String),

    /// The user cancelled the download.
    #[error("Download cancelled")]
    Cancelled,

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// yt-dlp could not be located or started.
    #[error("Process error: {0}")]
    Process(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    /// - 130: Interrupted by Ctrl+C
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Download(_) => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Busy(_) => 75,     // EX_TEMPFAIL
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Process(_) => 71,  // EX_OSERR
            Self::Cancelled => 130,
        }
    }

    /// Exit code for any error surfaced by a handler.
    pub fn exit_code_for(err: &anyhow::Error) -> u8 {
        err.downcast_ref::<Self>().map_or(1, Self::exit_code)
    }
}

impl From<JobError> for CliError {
    fn from(err: JobError) -> Self {
        match err {
            JobError::InvalidRequest { message } => Self::Arguments(message),
            JobError::ConcurrentJob { .. } => Self::Busy(err.to_string()),
            JobError::NoActiveJob | JobError::Extraction { .. } | JobError::Fetch { .. } => {
                Self::Download(err.user_message())
            }
            JobError::Aborted => Self::Cancelled,
            JobError::HistoryIo { message } => Self::Io(message),
        }
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<FetcherSetupError> for CliError {
    fn from(err: FetcherSetupError) -> Self {
        Self::Process(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_errors_map_to_exit_codes() {
        let cases = [
            (JobError::invalid_request("empty url"), 2),
            (JobError::concurrent_job("abc"), 75),
            (JobError::extraction("Unsupported URL"), 1),
            (JobError::fetch("HTTP Error 403"), 1),
            (JobError::Aborted, 130),
            (JobError::history_io("disk full"), 74),
        ];
        for (err, code) in cases {
            assert_eq!(CliError::from(err.clone()).exit_code(), code, "{err:?}");
        }
    }

    #[test]
    fn test_exit_code_for_non_cli_error_is_general() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(CliError::exit_code_for(&err), 1);

        let err = anyhow::Error::from(CliError::Cancelled);
        assert_eq!(CliError::exit_code_for(&err), 130);
    }

    #[test]
    fn test_setup_error_is_process_error() {
        let err = CliError::from(FetcherSetupError::NotFound("yt-dlp".to_string()));
        assert_eq!(err.exit_code(), 71);
        assert!(err.to_string().contains("yt-dlp not found"));
    }
}
