//! Job worker pipeline.
//!
//! Runs one job from metadata extraction to the fetcher's terminal result.
//! The worker never touches history and never finalizes the slot; it only
//! moves the job into `Fetching` and reports what happened. The supervising
//! task in the controller turns the outcome into a terminal state.
//!
//! # Cancellation
//!
//! Cooperative: the progress callback returns `JobError::Aborted` once the
//! flag is raised, and the fetcher is expected to stop and return it. A flag
//! raised before fetching begins is observed without calling the fetcher.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use mediagrab_core::download::{
    FormatPlan, JobError, JobId, JobState, RawProgress, RawStatus, UiEvent,
};
use mediagrab_core::ports::{
    EventEmitterPort, FetchRequest, MediaFetcherPort, ProgressCallback,
};

use super::slot::JobSlot;
use crate::progress::ProgressNormalizer;

/// Dependencies for the worker, cloned from the controller.
#[derive(Clone)]
pub(crate) struct WorkerDeps {
    pub fetcher: Arc<dyn MediaFetcherPort>,
    pub emitter: Arc<dyn EventEmitterPort>,
    pub slot: Arc<JobSlot>,
}

/// Value type describing the job to run.
pub(crate) struct WorkerJob {
    pub id: JobId,
    pub url: String,
    pub target_dir: PathBuf,
    pub plan: FormatPlan,
    pub cancel: Arc<AtomicBool>,
}

/// How the worker ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum JobOutcome {
    Completed { title: String },
    Cancelled,
    Failed(JobError),
}

pub(crate) async fn run_job(job: WorkerJob, deps: WorkerDeps) -> JobOutcome {
    deps.emitter
        .emit(UiEvent::log(format!("Starting download of {}", job.url)));
    deps.emitter
        .emit(UiEvent::status("Starting download...", Some(0)));

    let metadata = match deps.fetcher.extract_metadata(&job.url).await {
        Ok(metadata) => metadata,
        Err(JobError::Aborted) => return JobOutcome::Cancelled,
        Err(e @ JobError::Extraction { .. }) => return JobOutcome::Failed(e),
        Err(other) => return JobOutcome::Failed(JobError::extraction(other.to_string())),
    };

    tracing::debug!(
        target: "mediagrab.download",
        job_id = %job.id,
        title = %metadata.title,
        "metadata extracted"
    );
    deps.emitter
        .emit(UiEvent::log(format!("Found: {}", metadata.title)));
    deps.emitter.emit(UiEvent::metadata(metadata.clone()));

    deps.slot.set_state(job.id, JobState::Fetching);

    if job.cancel.load(Ordering::SeqCst) {
        tracing::debug!(target: "mediagrab.download", job_id = %job.id, "cancelled before fetch");
        return JobOutcome::Cancelled;
    }

    let on_progress = progress_callback(Arc::clone(&job.cancel), Arc::clone(&deps.emitter));
    let request = FetchRequest {
        url: job.url,
        target_dir: job.target_dir,
        plan: job.plan,
    };

    match deps.fetcher.fetch(&request, &on_progress).await {
        Ok(outcome) => {
            let title = outcome
                .final_title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or(metadata.title);
            JobOutcome::Completed { title }
        }
        Err(JobError::Aborted) => JobOutcome::Cancelled,
        Err(e) => JobOutcome::Failed(e),
    }
}

/// Build the callback handed to the fetcher for one job.
///
/// Checks the cancel flag first; otherwise normalizes the payload and relays
/// it as a status update.
fn progress_callback(
    cancel: Arc<AtomicBool>,
    emitter: Arc<dyn EventEmitterPort>,
) -> ProgressCallback {
    let normalizer = Mutex::new(ProgressNormalizer::new());

    Box::new(move |raw: RawProgress| {
        if cancel.load(Ordering::SeqCst) {
            return Err(JobError::Aborted);
        }

        let event = normalizer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .normalize(&raw);
        emitter.emit(UiEvent::from_progress(event));

        match (raw.status, raw.filename) {
            (RawStatus::Finished, Some(file)) => emitter.emit(UiEvent::log(format!("Finished: {file}"))),
            (RawStatus::Error, Some(file)) => emitter.emit(UiEvent::log(format!("Error: {file}"))),
            _ => {}
        }
        Ok(())
    })
}
