//! Shared fixtures for controller integration tests.
//!
//! - [`ScriptedFetcher`]: a `MediaFetcherPort` fake that replays a fixed
//!   script of progress payloads and rendezvous points on every fetch
//! - [`MockHistory`]: `mockall` mock of the history port
//! - helpers for draining and filtering relay events

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use mockall::mock;
use tokio::runtime::Handle;
use tokio::sync::Notify;

use mediagrab_core::settings::HistoryEntry;
use mediagrab_download::{
    EventReceiver, EventRelay, FetchOutcome, FetchRequest, HistoryRepositoryPort, JobController,
    JobControllerDeps, JobError, JobRequest, MediaFetcherPort, MediaMetadata, MediaType,
    ProgressCallback, QualitySelector, RawProgress, UiEvent, build_job_controller,
};

// ── Scripted fetcher ───────────────────────────────────────────────

/// One step of a fetch script.
#[derive(Clone)]
pub enum Step {
    /// Hand a payload to the progress callback; an `Err` ends the fetch.
    Progress(RawProgress),
    /// Signal the test that this point was reached.
    Reached(Arc<Notify>),
    /// Wait until the test lets the fetch continue.
    Resume(Arc<Notify>),
    /// End the fetch with an error.
    Fail(JobError),
    /// Hand a payload to the callback and keep going even if it asks to stop.
    IgnoreAbort(RawProgress),
    Panic,
}

pub struct ScriptedFetcher {
    metadata: Result<MediaMetadata, JobError>,
    metadata_gate: Option<Arc<Notify>>,
    steps: Vec<Step>,
    final_title: Option<String>,
    fetch_calls: AtomicUsize,
}

impl ScriptedFetcher {
    pub fn new(title: &str) -> Self {
        Self {
            metadata: Ok(MediaMetadata {
                title: title.to_string(),
                duration_seconds: Some(212),
                uploader: Some("Uploader".to_string()),
                view_count: Some(1_234_567),
            }),
            metadata_gate: None,
            steps: Vec::new(),
            final_title: None,
            fetch_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_metadata(err: JobError) -> Self {
        Self {
            metadata: Err(err),
            ..Self::new("unused")
        }
    }

    /// Block metadata extraction until `gate` is notified.
    pub fn with_metadata_gate(mut self, gate: Arc<Notify>) -> Self {
        self.metadata_gate = Some(gate);
        self
    }

    pub fn with_steps(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
        self.steps.extend(steps);
        self
    }

    pub fn with_final_title(mut self, title: &str) -> Self {
        self.final_title = Some(title.to_string());
        self
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaFetcherPort for ScriptedFetcher {
    async fn extract_metadata(&self, _url: &str) -> Result<MediaMetadata, JobError> {
        if let Some(gate) = &self.metadata_gate {
            gate.notified().await;
        }
        self.metadata.clone()
    }

    async fn fetch(
        &self,
        _request: &FetchRequest,
        on_progress: &ProgressCallback,
    ) -> Result<FetchOutcome, JobError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        for step in self.steps.clone() {
            match step {
                Step::Progress(raw) => on_progress(raw)?,
                Step::Reached(signal) => signal.notify_one(),
                Step::Resume(gate) => gate.notified().await,
                Step::Fail(err) => return Err(err),
                Step::IgnoreAbort(raw) => {
                    let _ = on_progress(raw);
                }
                Step::Panic => panic!("scripted fetcher panic"),
            }
        }
        Ok(FetchOutcome {
            final_title: self.final_title.clone(),
        })
    }
}

/// Percent-of-100 download payload.
pub fn at(percent: u64) -> Step {
    Step::Progress(RawProgress::downloading(percent, Some(100)))
}

pub fn finished(file: &str) -> Step {
    Step::Progress(RawProgress::finished(Some(file.to_string())))
}

// ── Mock history ───────────────────────────────────────────────────

mock! {
    pub History {}

    impl HistoryRepositoryPort for History {
        fn append(&self, entry: HistoryEntry) -> Result<(), JobError>;
        fn recent(&self, n: usize) -> Vec<HistoryEntry>;
        fn len(&self) -> usize;
    }
}

// ── Wiring ─────────────────────────────────────────────────────────

pub fn controller(
    fetcher: Arc<ScriptedFetcher>,
    history: Arc<dyn HistoryRepositoryPort>,
) -> (JobController, EventReceiver) {
    let (relay, rx) = EventRelay::channel();
    let controller = build_job_controller(JobControllerDeps {
        fetcher,
        history,
        emitter: Arc::new(relay),
        runtime: Handle::current(),
    });
    (controller, rx)
}

pub fn video_request(dir: &Path) -> JobRequest {
    JobRequest::new(
        "https://valid/video",
        dir,
        MediaType::VideoContainer,
        QualitySelector::HeightCap(720),
    )
}

// ── Event helpers ──────────────────────────────────────────────────

/// Drain all pending events from the relay.
pub fn drain_events(rx: &mut EventReceiver) -> Vec<UiEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// `(message, percent)` for every status update, in order.
pub fn statuses(events: &[UiEvent]) -> Vec<(String, Option<u8>)> {
    events
        .iter()
        .filter_map(|e| match e {
            UiEvent::StatusUpdate { message, percent } => Some((message.clone(), *percent)),
            _ => None,
        })
        .collect()
}

/// Log lines with their `[HH:MM:SS] ` prefix removed.
pub fn log_lines(events: &[UiEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            UiEvent::LogLine { text } => Some(
                text.split_once("] ")
                    .map_or_else(|| text.clone(), |(_, rest)| rest.to_string()),
            ),
            _ => None,
        })
        .collect()
}

pub fn notices(events: &[UiEvent]) -> Vec<UiEvent> {
    events
        .iter()
        .filter(|e| matches!(e, UiEvent::ErrorNotice { .. } | UiEvent::InfoNotice { .. }))
        .cloned()
        .collect()
}
