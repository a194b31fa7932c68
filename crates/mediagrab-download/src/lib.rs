#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]

// Re-export core types for convenience
pub use mediagrab_core::download::{
    FormatPlan, Job, JobError, JobId, JobRequest, JobState, MediaMetadata, MediaType,
    ProgressEvent, ProgressPhase, QualitySelector, RawProgress, RawStatus, UiEvent,
};
pub use mediagrab_core::ports::{
    EventEmitterPort, FetchOutcome, FetchRequest, HistoryRepositoryPort, MediaFetcherPort,
    NoopEmitter, ProgressCallback,
};

mod format;
pub use format::resolve_format;

mod progress;
pub use progress::{ProgressNormalizer, ProgressThrottle, parse_percent_str, strip_ansi};

mod relay;
pub use relay::{EventReceiver, EventRelay};

mod history;
pub use history::HistoryStore;

// yt-dlp adapter
pub mod fetcher;
pub use fetcher::{FetcherConfig, FetcherSetupError, YtDlpFetcher};

// Public API - job controller
mod manager;
pub use manager::{JobController, JobControllerDeps, JobTicket, build_job_controller};
