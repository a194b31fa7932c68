//! Download domain types, events, errors and job lifecycle.
//!
//! Pure data types only. No I/O, networking, or runtime dependencies.
//!
//! # Structure
//!
//! - `types` - Media types, quality selectors, format plans and metadata
//! - `job` - Job identity, state machine states and the start request
//! - `progress` - Raw fetcher progress and normalized progress events
//! - `events` - Events delivered to the UI surface (`UiEvent`)
//! - `errors` - `JobError`

pub mod errors;
pub mod events;
pub mod job;
pub mod progress;
pub mod types;

pub use errors::JobError;
pub use events::UiEvent;
pub use job::{Job, JobId, JobRequest, JobState};
pub use progress::{ProgressEvent, ProgressPhase, RawProgress, RawStatus};
pub use types::{
    AudioCodec, AudioExtraction, Container, DEFAULT_MP3_BITRATE_KBPS, FormatPlan, MediaMetadata,
    MediaType, PostProcessing, QualitySelector,
};
