//! `MediaFetcherPort` implementation that drives the yt-dlp executable.
//!
//! - metadata: one `--dump-single-json` run, stdout parsed as JSON
//! - fetch: stdout and stderr are streamed line by line through the
//!   protocol parser; progress goes to the callback, everything else is
//!   logged at debug level and the stderr tail is kept for error messages

use std::collections::VecDeque;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;

use mediagrab_core::download::{JobError, MediaMetadata};
use mediagrab_core::ports::{FetchOutcome, FetchRequest, MediaFetcherPort, ProgressCallback};

use super::binary::{FetcherConfig, FetcherSetupError};
use super::command::{fetch_args, metadata_args};
use super::protocol::{FetcherEvent, parse_line, parse_metadata};

/// Number of stderr lines kept for error reporting.
const STDERR_TAIL: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

/// Fetcher backed by a yt-dlp executable.
#[derive(Debug, Clone)]
pub struct YtDlpFetcher {
    binary: PathBuf,
}

impl YtDlpFetcher {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Locate the executable as configured.
    pub fn from_config(config: &FetcherConfig) -> Result<Self, FetcherSetupError> {
        let binary = config.locate()?;
        tracing::debug!(binary = %binary.display(), "using yt-dlp");
        Ok(Self::new(binary))
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .env("PYTHONUNBUFFERED", "1")
            .env("PYTHONIOENCODING", "utf-8")
            .kill_on_drop(true);
        // Keep terminal Ctrl+C away from the child; cancellation goes
        // through the progress callback.
        #[cfg(unix)]
        cmd.process_group(0);
        cmd
    }
}

#[async_trait]
impl MediaFetcherPort for YtDlpFetcher {
    async fn extract_metadata(&self, url: &str) -> Result<MediaMetadata, JobError> {
        let output = self
            .command()
            .args(metadata_args(url))
            .output()
            .await
            .map_err(|e| JobError::extraction(format!("failed to run yt-dlp: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(JobError::extraction(failure_reason(
                stderr.lines(),
                &output.status.to_string(),
            )));
        }

        parse_metadata(&String::from_utf8_lossy(&output.stdout))
            .map_err(|e| JobError::extraction(format!("unexpected yt-dlp output: {e}")))
    }

    async fn fetch(
        &self,
        request: &FetchRequest,
        on_progress: &ProgressCallback,
    ) -> Result<FetchOutcome, JobError> {
        let mut child = self
            .command()
            .args(fetch_args(request))
            .spawn()
            .map_err(|e| JobError::fetch(format!("failed to start yt-dlp: {e}")))?;

        let (tx, mut rx) = mpsc::unbounded_channel();
        if let Some(stdout) = child.stdout.take() {
            spawn_line_reader(stdout, Stream::Stdout, tx.clone());
        }
        if let Some(stderr) = child.stderr.take() {
            spawn_line_reader(stderr, Stream::Stderr, tx.clone());
        }
        drop(tx);

        let mut final_title = None;
        let mut stderr_tail: VecDeque<String> = VecDeque::with_capacity(STDERR_TAIL);

        // Ends when both readers hit EOF.
        while let Some((stream, line)) = rx.recv().await {
            match parse_line(&line) {
                Ok(Some(FetcherEvent::Progress(raw))) => {
                    if let Err(e) = on_progress(raw) {
                        tracing::debug!(error = %e, "progress callback stopped the fetch");
                        stop(&mut child).await;
                        return Err(e);
                    }
                }
                Ok(Some(FetcherEvent::Title(title))) => final_title = Some(title),
                Ok(None) => {
                    if !line.trim().is_empty() {
                        tracing::debug!(target: "mediagrab.ytdlp", ?stream, "{line}");
                        if stream == Stream::Stderr {
                            if stderr_tail.len() == STDERR_TAIL {
                                stderr_tail.pop_front();
                            }
                            stderr_tail.push_back(line);
                        }
                    }
                }
                Err(e) => tracing::warn!(error = %e, "malformed progress line"),
            }
        }

        let status = child
            .wait()
            .await
            .map_err(|e| JobError::fetch(format!("failed to wait for yt-dlp: {e}")))?;

        if !status.success() {
            return Err(JobError::fetch(failure_reason(
                stderr_tail.iter().map(String::as_str),
                &status.to_string(),
            )));
        }

        Ok(FetchOutcome { final_title })
    }
}

fn spawn_line_reader<R>(reader: R, stream: Stream, tx: mpsc::UnboundedSender<(Stream, String)>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tx.send((stream, line)).is_err() {
                break;
            }
        }
    });
}

async fn stop(child: &mut Child) {
    if let Err(e) = child.kill().await {
        tracing::debug!(error = %e, "yt-dlp already exited");
    }
}

/// Pick the most useful message from yt-dlp's stderr.
///
/// Prefers the last `ERROR:` line, then the last non-empty line, then the
/// exit status.
fn failure_reason<'a>(lines: impl DoubleEndedIterator<Item = &'a str> + Clone, status: &str) -> String {
    let last_error = lines
        .clone()
        .rev()
        .find_map(|l| l.trim().strip_prefix("ERROR:").map(str::trim));
    if let Some(message) = last_error.filter(|m| !m.is_empty()) {
        return message.to_string();
    }

    lines
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map_or_else(|| format!("yt-dlp exited with {status}"), str::to_string)
}
