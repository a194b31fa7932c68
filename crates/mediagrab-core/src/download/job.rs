//! Job identity, lifecycle state and submission request.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::JobError;
use super::types::{MediaType, QualitySelector};

/// Opaque job identifier, created at submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of the controller's job slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    #[default]
    Idle,
    ExtractingMetadata,
    Fetching,
    Completed,
    Cancelled,
    Failed,
}

impl JobState {
    /// Terminal states are reached exactly once per job and are never left
    /// except by returning the slot to `Idle`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Failed)
    }

    /// A job occupies the slot in any non-idle, non-terminal state.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::ExtractingMetadata | Self::Fetching)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::ExtractingMetadata => "extracting_metadata",
            Self::Fetching => "fetching",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A start request as handed to the controller.
///
/// The quality has already been parsed into a typed selector; use
/// [`JobRequest::from_raw`] to build one from UI strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequest {
    pub url: String,
    pub target_dir: PathBuf,
    pub media_type: MediaType,
    pub quality: QualitySelector,
}

impl JobRequest {
    pub fn new(
        url: impl Into<String>,
        target_dir: impl Into<PathBuf>,
        media_type: MediaType,
        quality: QualitySelector,
    ) -> Self {
        Self {
            url: url.into(),
            target_dir: target_dir.into(),
            media_type,
            quality,
        }
    }

    /// Build a request from raw UI strings, parsing the quality selector.
    pub fn from_raw(
        url: impl Into<String>,
        target_dir: impl Into<PathBuf>,
        media_type: MediaType,
        raw_quality: &str,
    ) -> Result<Self, JobError> {
        let quality = QualitySelector::parse(raw_quality)?;
        Ok(Self::new(url, target_dir, media_type, quality))
    }
}

/// Snapshot of a job.
///
/// While the job is running the controller mutates its own copy; once a
/// terminal state is reached the snapshot is immutable and handed out
/// through the job ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub url: String,
    /// Canonical, absolute target directory.
    pub target_dir: PathBuf,
    pub media_type: MediaType,
    pub quality: QualitySelector,
    pub state: JobState,
    pub submitted_at: DateTime<Utc>,
    /// Only set on `Completed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_title: Option<String>,
    /// Only set on `Failed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl Job {
    /// Create a job in `ExtractingMetadata` from a validated request.
    #[must_use]
    pub fn accepted(request: JobRequest) -> Self {
        Self {
            id: JobId::new(),
            url: request.url,
            target_dir: request.target_dir,
            media_type: request.media_type,
            quality: request.quality,
            state: JobState::ExtractingMetadata,
            submitted_at: Utc::now(),
            result_title: None,
            failure_reason: None,
        }
    }

    /// Mark the job completed with the given title.
    pub fn complete(&mut self, title: impl Into<String>) {
        self.state = JobState::Completed;
        self.result_title = Some(title.into());
        self.failure_reason = None;
    }

    /// Mark the job cancelled.
    pub fn cancel(&mut self) {
        self.state = JobState::Cancelled;
        self.result_title = None;
        self.failure_reason = None;
    }

    /// Mark the job failed with a reason.
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.state = JobState::Failed;
        self.result_title = None;
        self.failure_reason = Some(reason.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> JobRequest {
        JobRequest::new(
            "https://example.com/v",
            "/tmp",
            MediaType::VideoContainer,
            QualitySelector::HeightCap(720),
        )
    }

    #[test]
    fn test_terminal_states() {
        assert!(JobState::Completed.is_terminal());
        assert!(JobState::Cancelled.is_terminal());
        assert!(JobState::Failed.is_terminal());
        assert!(!JobState::Idle.is_terminal());
        assert!(!JobState::Fetching.is_terminal());
        assert!(JobState::ExtractingMetadata.is_active());
        assert!(!JobState::Idle.is_active());
    }

    #[test]
    fn test_accepted_job_starts_extracting() {
        let job = Job::accepted(request());
        assert_eq!(job.state, JobState::ExtractingMetadata);
        assert!(job.result_title.is_none());
        assert!(job.failure_reason.is_none());
    }

    #[test]
    fn test_terminal_transitions_set_only_their_field() {
        let mut job = Job::accepted(request());
        job.fail("boom");
        assert_eq!(job.state, JobState::Failed);
        assert_eq!(job.failure_reason.as_deref(), Some("boom"));

        job.complete("Title");
        assert_eq!(job.result_title.as_deref(), Some("Title"));
        assert!(job.failure_reason.is_none());

        job.cancel();
        assert!(job.result_title.is_none());
    }

    #[test]
    fn test_from_raw_parses_quality() {
        let req = JobRequest::from_raw("u", "/tmp", MediaType::AudioMp3, "Default (192k)").unwrap();
        assert_eq!(req.quality, QualitySelector::AudioBitrate(192));
        assert!(JobRequest::from_raw("u", "/tmp", MediaType::AudioMp3, "loud").is_err());
    }

    #[test]
    fn test_job_ids_are_unique() {
        assert_ne!(JobId::new(), JobId::new());
    }
}
