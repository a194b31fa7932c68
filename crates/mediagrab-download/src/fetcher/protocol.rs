//! Line protocol between yt-dlp and the fetcher.
//!
//! yt-dlp is started with templates that prefix the lines we care about:
//!
//! ```text
//! mediagrab-progress {"status": "downloading", "downloaded_bytes": 1024, ...}
//! mediagrab-postprocess {"status": "started", "postprocessor": "Merger", ...}
//! mediagrab-title Some Video Title
//! ```
//!
//! Every other line is ordinary yt-dlp output and is not part of the
//! protocol.

use serde::Deserialize;
use thiserror::Error;

use mediagrab_core::download::{MediaMetadata, RawProgress, RawStatus};

pub const PROGRESS_PREFIX: &str = "mediagrab-progress ";
pub const POSTPROCESS_PREFIX: &str = "mediagrab-postprocess ";
pub const TITLE_PREFIX: &str = "mediagrab-title ";

/// Errors that can occur when parsing protocol messages.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Missing or invalid 'status' field")]
    InvalidStatus,

    #[error("Unknown status: {0}")]
    UnknownStatus(String),
}

/// A protocol line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetcherEvent {
    Progress(RawProgress),
    /// Final title, printed after the file was moved into place.
    Title(String),
}

/// Progress dict as serialized by yt-dlp's `%(progress)j`.
///
/// Byte counts may be floats (estimates) or null.
#[derive(Deserialize)]
struct WireProgress {
    status: Option<String>,
    downloaded_bytes: Option<f64>,
    total_bytes: Option<f64>,
    total_bytes_estimate: Option<f64>,
    #[serde(rename = "_percent_str")]
    percent_str: Option<String>,
    #[serde(rename = "_total_bytes_str")]
    total_bytes_str: Option<String>,
    #[serde(rename = "_total_bytes_estimate_str")]
    total_bytes_estimate_str: Option<String>,
    #[serde(rename = "_speed_str")]
    speed_str: Option<String>,
    #[serde(rename = "_eta_str")]
    eta_str: Option<String>,
    filename: Option<String>,
    postprocessor: Option<String>,
}

impl WireProgress {
    fn into_raw(self, status: RawStatus) -> RawProgress {
        RawProgress {
            status,
            downloaded_bytes: bytes(self.downloaded_bytes),
            total_bytes: bytes(self.total_bytes),
            total_bytes_estimate: bytes(self.total_bytes_estimate),
            percent_str: self.percent_str,
            total_bytes_str: self.total_bytes_str.or(self.total_bytes_estimate_str),
            speed_str: self.speed_str,
            eta_str: self.eta_str,
            filename: self.filename,
            postprocessor: self.postprocessor,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bytes(value: Option<f64>) -> Option<u64> {
    value
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v as u64)
}

/// Parse a single output line.
///
/// - `Ok(None)` for lines that are not part of the protocol
/// - `Err(ProtocolError)` for protocol lines with a malformed payload
pub fn parse_line(line: &str) -> Result<Option<FetcherEvent>, ProtocolError> {
    let line = line.trim_end_matches(['\r', '\n']);

    if let Some(payload) = line.strip_prefix(PROGRESS_PREFIX) {
        let wire: WireProgress = serde_json::from_str(payload)?;
        let status = match wire.status.as_deref() {
            Some("downloading") => RawStatus::Downloading,
            Some("finished") => RawStatus::Finished,
            Some("error") => RawStatus::Error,
            Some(other) => return Err(ProtocolError::UnknownStatus(other.to_string())),
            None => return Err(ProtocolError::InvalidStatus),
        };
        return Ok(Some(FetcherEvent::Progress(wire.into_raw(status))));
    }

    if let Some(payload) = line.strip_prefix(POSTPROCESS_PREFIX) {
        let wire: WireProgress = serde_json::from_str(payload)?;
        match wire.status.as_deref() {
            Some("started" | "processing" | "finished") => {}
            Some(other) => return Err(ProtocolError::UnknownStatus(other.to_string())),
            None => return Err(ProtocolError::InvalidStatus),
        }
        return Ok(Some(FetcherEvent::Progress(
            wire.into_raw(RawStatus::Processing),
        )));
    }

    if let Some(title) = line.strip_prefix(TITLE_PREFIX) {
        return Ok(Some(FetcherEvent::Title(title.trim().to_string())));
    }

    Ok(None)
}

/// Subset of `--dump-single-json` output.
#[derive(Deserialize)]
struct WireInfo {
    title: Option<String>,
    duration: Option<f64>,
    uploader: Option<String>,
    channel: Option<String>,
    view_count: Option<u64>,
}

/// Parse the info JSON printed by a metadata-only run.
pub fn parse_metadata(json: &str) -> Result<MediaMetadata, ProtocolError> {
    let info: WireInfo = serde_json::from_str(json)?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let duration_seconds = info
        .duration
        .filter(|d| d.is_finite() && *d >= 0.0)
        .map(|d| d.round() as u64);

    Ok(MediaMetadata {
        title: info
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| "unknown_title".to_string()),
        duration_seconds,
        uploader: info.uploader.or(info.channel),
        view_count: info.view_count,
    })
}
