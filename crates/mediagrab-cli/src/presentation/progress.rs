//! Rendering of relay events for a running download.
//!
//! Terminal output gets an indicatif bar driven by the status percent, with
//! log lines and notices printed above it. Redirected output gets plain
//! lines, rate-limited with [`ProgressThrottle`].

use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use mediagrab_core::download::{MediaMetadata, ProgressPhase, UiEvent};
use mediagrab_download::ProgressThrottle;

/// Minimum interval between plain progress lines.
const PLAIN_INTERVAL: Duration = Duration::from_secs(1);

/// Event printer that automatically selects terminal or plain output.
pub struct StatusPrinter {
    inner: StatusRender,
}

enum StatusRender {
    Fancy(FancyStatus),
    Plain(PlainStatus),
}

impl StatusPrinter {
    /// Create a printer, auto-detecting terminal capability.
    pub fn new() -> Self {
        if io::stdout().is_terminal() {
            Self {
                inner: StatusRender::Fancy(FancyStatus::new()),
            }
        } else {
            Self {
                inner: StatusRender::Plain(PlainStatus::new()),
            }
        }
    }

    /// Render one relay event.
    pub fn handle(&mut self, event: &UiEvent) {
        match event {
            UiEvent::StatusUpdate { message, percent } => self.status(message, *percent),
            UiEvent::LogLine { text } => self.line(text),
            UiEvent::ErrorNotice { title, message } => {
                self.with_suspended(|| eprintln!("✗ {title}: {message}"));
            }
            UiEvent::InfoNotice { title, message } => self.line(&format!("{title}: {message}")),
            UiEvent::MetadataUpdate { metadata } => self.metadata(metadata),
        }
    }

    /// Finish and clear the progress display.
    pub fn finish(&mut self) {
        if let StatusRender::Fancy(inner) = &self.inner {
            inner.bar.finish_and_clear();
        }
    }

    fn status(&mut self, message: &str, percent: Option<u8>) {
        match &mut self.inner {
            StatusRender::Fancy(inner) => inner.update(message, percent),
            StatusRender::Plain(inner) => inner.update(message, percent),
        }
    }

    fn line(&self, text: &str) {
        match &self.inner {
            StatusRender::Fancy(inner) => inner.bar.println(text),
            StatusRender::Plain(_) => println!("{text}"),
        }
    }

    fn metadata(&self, metadata: &MediaMetadata) {
        for line in metadata.summary().lines() {
            self.line(&format!("  {line}"));
        }
    }

    fn with_suspended(&self, f: impl FnOnce()) {
        match &self.inner {
            StatusRender::Fancy(inner) => inner.bar.suspend(f),
            StatusRender::Plain(_) => f(),
        }
    }
}

impl Default for StatusPrinter {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Fancy Terminal Progress (indicatif)
// ============================================================================

struct FancyStatus {
    bar: ProgressBar,
}

impl FancyStatus {
    fn new() -> Self {
        let bar = ProgressBar::with_draw_target(Some(100), ProgressDrawTarget::stdout());
        bar.set_style(bar_style());
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar }
    }

    fn update(&self, message: &str, percent: Option<u8>) {
        if let Some(percent) = percent {
            self.bar.set_position(u64::from(percent));
        }
        self.bar.set_message(message.to_string());
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner} {bar:30.cyan/blue} {pos:>3}% {wide_msg}")
        .map_or_else(|_| ProgressStyle::default_bar(), |style| style.progress_chars("=> "))
}

// ============================================================================
// Plain Progress (non-terminal)
// ============================================================================

struct PlainStatus {
    throttle: ProgressThrottle,
    last_message: Option<String>,
}

impl PlainStatus {
    fn new() -> Self {
        Self {
            throttle: ProgressThrottle::new(PLAIN_INTERVAL),
            last_message: None,
        }
    }

    fn update(&mut self, message: &str, percent: Option<u8>) {
        if self.last_message.as_deref() == Some(message) {
            return;
        }
        let phase = status_phase(message, percent);
        if phase == ProgressPhase::Downloading {
            if !self.throttle.should_emit(phase) {
                return;
            }
        } else {
            // Transitions always print; the next download line starts a fresh window.
            self.throttle.reset();
        }
        println!("{}", plain_line(message, percent));
        self.last_message = Some(message.to_string());
    }
}

/// Phase a status line belongs to, for throttling.
///
/// Only download lines are throttled; every other status is a transition
/// and always printed.
fn status_phase(message: &str, percent: Option<u8>) -> ProgressPhase {
    if message.starts_with("Downloading") {
        return ProgressPhase::Downloading;
    }
    match percent {
        Some(100) => ProgressPhase::Finished,
        _ => ProgressPhase::Processing,
    }
}

fn plain_line(message: &str, percent: Option<u8>) -> String {
    match percent {
        Some(p) => format!("[{p:>3}%] {message}"),
        None => format!("[    ] {message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_pads_percent() {
        assert_eq!(plain_line("Ready", Some(0)), "[  0%] Ready");
        assert_eq!(plain_line("Cancelling download...", None), "[    ] Cancelling download...");
    }

    #[test]
    fn test_status_phase() {
        assert_eq!(
            status_phase("Downloading: 45% @ 1MiB/s", Some(45)),
            ProgressPhase::Downloading
        );
        assert_eq!(status_phase("Download complete!", Some(100)), ProgressPhase::Finished);
        assert_eq!(status_phase("Ready", Some(0)), ProgressPhase::Processing);
        assert_eq!(status_phase("Processing...", None), ProgressPhase::Processing);
        assert_eq!(
            status_phase("Downloading additional stream: 40%", Some(100)),
            ProgressPhase::Downloading
        );
    }

    #[test]
    fn test_plain_status_drops_bursts() {
        let mut plain = PlainStatus::new();
        plain.update("Downloading: 1%", Some(1));
        assert_eq!(plain.last_message.as_deref(), Some("Downloading: 1%"));

        // Same phase inside the interval: dropped.
        plain.update("Downloading: 2%", Some(2));
        assert_eq!(plain.last_message.as_deref(), Some("Downloading: 1%"));

        // Phase change: printed.
        plain.update("Download finished, processing...", Some(100));
        assert_eq!(
            plain.last_message.as_deref(),
            Some("Download finished, processing...")
        );
    }

    #[test]
    fn test_plain_status_prints_cancel_sequence() {
        let mut plain = PlainStatus::new();
        plain.update("Downloading: 30%", Some(30));
        plain.update("Cancelling download...", None);
        assert_eq!(plain.last_message.as_deref(), Some("Cancelling download..."));
        plain.update("Download cancelled.", Some(0));
        assert_eq!(plain.last_message.as_deref(), Some("Download cancelled."));
    }

    #[test]
    fn test_plain_status_prints_fast_failure() {
        let mut plain = PlainStatus::new();
        plain.update("Starting download...", Some(0));
        plain.update("Download error.", Some(0));
        assert_eq!(plain.last_message.as_deref(), Some("Download error."));
        plain.update("Ready", Some(0));
        assert_eq!(plain.last_message.as_deref(), Some("Ready"));
    }

    #[test]
    fn test_download_line_after_transition_is_printed() {
        let mut plain = PlainStatus::new();
        plain.update("Downloading: 10%", Some(10));
        plain.update("Processing (Merger)...", Some(100));
        plain.update("Downloading additional stream: 5%", Some(100));
        assert_eq!(
            plain.last_message.as_deref(),
            Some("Downloading additional stream: 5%")
        );
    }
}
