//! Raw progress normalization.
//!
//! Turns heterogeneous fetcher payloads into `(phase, percent, message)`
//! with a few guarantees the UI can rely on:
//!
//! - percent is in `0..=100` and never moves backwards within a job
//! - the `Finished` phase (at 100) is reported exactly once per job
//! - anything after `Finished` (extra streams, post-processors) is reported as
//!   `Processing` at 100

use mediagrab_core::download::{ProgressEvent, ProgressPhase, RawProgress, RawStatus};

/// Stateful normalizer; create one per job.
#[derive(Debug, Default)]
pub struct ProgressNormalizer {
    last_percent: Option<u8>,
    finished: bool,
}

impl ProgressNormalizer {
    pub const fn new() -> Self {
        Self {
            last_percent: None,
            finished: false,
        }
    }

    pub fn normalize(&mut self, raw: &RawProgress) -> ProgressEvent {
        match raw.status {
            RawStatus::Error => ProgressEvent {
                phase: ProgressPhase::Error,
                percent: None,
                message: "Download error.".to_string(),
            },
            RawStatus::Downloading if !self.finished => self.downloading(raw),
            RawStatus::Downloading => {
                let percent = raw_percent(raw)
                    .map_or_else(|| "...".to_string(), |p| format!("{p}%"));
                self.processing(format!("Downloading additional stream: {percent}"))
            }
            RawStatus::Finished if !self.finished => {
                self.finished = true;
                self.last_percent = Some(100);
                ProgressEvent {
                    phase: ProgressPhase::Finished,
                    percent: Some(100),
                    message: "Download finished, processing...".to_string(),
                }
            }
            RawStatus::Finished => self.processing("Additional stream finished, processing...".to_string()),
            RawStatus::Processing => {
                let message = match raw.postprocessor.as_deref().map(str::trim) {
                    Some(name) if !name.is_empty() => format!("Processing ({name})..."),
                    _ => "Processing...".to_string(),
                };
                self.processing(message)
            }
        }
    }

    fn processing(&mut self, message: String) -> ProgressEvent {
        self.last_percent = Some(100);
        ProgressEvent {
            phase: ProgressPhase::Processing,
            percent: Some(100),
            message,
        }
    }

    fn downloading(&mut self, raw: &RawProgress) -> ProgressEvent {
        let percent = match (raw_percent(raw), self.last_percent) {
            (Some(current), Some(previous)) => Some(current.max(previous)),
            (current, previous) => current.or(previous),
        };
        self.last_percent = percent;

        let percent_text = raw
            .percent_str
            .as_deref()
            .map(strip_ansi)
            .map(|s| s.trim().to_string())
            .filter(|s| parse_percent_str(s).is_some())
            .or_else(|| percent.map(|p| format!("{p}%")))
            .unwrap_or_else(|| "?%".to_string());
        let speed = display_or(raw.speed_str.as_deref(), "unknown speed");

        let message = if raw.total().is_some_and(|t| t > 0) || raw.total_bytes_str.is_some() {
            let total = display_or(raw.total_bytes_str.as_deref(), "unknown size");
            format!("Downloading: {percent_text} of {total} @ {speed}")
        } else {
            format!("Downloading: {percent_text} @ {speed}")
        };

        ProgressEvent {
            phase: ProgressPhase::Downloading,
            percent,
            message,
        }
    }
}

/// Percent derived from a single payload, without history.
///
/// Byte counts win over the formatted string.
fn raw_percent(raw: &RawProgress) -> Option<u8> {
    if let (Some(downloaded), Some(total)) = (raw.downloaded_bytes, raw.total()) {
        if total > 0 {
            let pct = (u128::from(downloaded) * 100 / u128::from(total)).min(100);
            return u8::try_from(pct).ok();
        }
    }
    raw.percent_str.as_deref().and_then(parse_percent_str)
}

/// Parse strings like `"\u{1b}[0;94m 45.2%\u{1b}[0m"` into a floored percent.
pub fn parse_percent_str(raw: &str) -> Option<u8> {
    let cleaned = strip_ansi(raw);
    let value: f64 = cleaned.trim().trim_end_matches('%').trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    let clamped = value.clamp(0.0, 100.0).floor();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some(clamped as u8)
}

/// Remove ANSI CSI escape sequences (`ESC [ ... final-byte`).
pub fn strip_ansi(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\u{1b}' {
            out.push(ch);
            continue;
        }
        if chars.peek() == Some(&'[') {
            chars.next();
            // Parameter and intermediate bytes, then one final byte in '@'..='~'.
            for c in chars.by_ref() {
                if ('@'..='~').contains(&c) {
                    break;
                }
            }
        }
    }
    out
}

fn display_or(value: Option<&str>, fallback: &str) -> String {
    value
        .map(strip_ansi)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && s != "NA" && s != "N/A")
        .unwrap_or_else(|| fallback.to_string())
}
