#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod download;
pub mod paths;
pub mod ports;
pub mod settings;

// Re-export commonly used types for convenience
pub use download::{
    AudioCodec, AudioExtraction, Container, DEFAULT_MP3_BITRATE_KBPS, FormatPlan, Job, JobError,
    JobId, JobRequest, JobState, MediaMetadata, MediaType, PostProcessing, ProgressEvent,
    ProgressPhase, QualitySelector, RawProgress, RawStatus, UiEvent,
};
pub use ports::{
    EventEmitterPort, FetchOutcome, FetchRequest, HistoryRepositoryPort, MediaFetcherPort,
    NoopEmitter, ProgressCallback,
};
pub use settings::{
    AppConfig, DEFAULT_DOWNLOADS_PATH, HISTORY_CAPACITY, HISTORY_DATE_FORMAT, HistoryEntry,
};

// Re-export path utilities
pub use paths::{
    DirectoryCreationStrategy, DownloadsDirResolution, DownloadsDirSource, PathError,
    ResolvedPaths, config_file_path, data_root, default_downloads_dir, ensure_directory,
    normalize_user_path, resolve_downloads_dir, verify_writable,
};
