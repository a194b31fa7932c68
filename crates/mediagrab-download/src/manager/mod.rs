//! Job controller.
//!
//! Owns the single job slot and drives the media fetcher for the job in it.
//!
//! # Architecture
//!
//! - **Controller**: `start` / `cancel` are synchronous and never block on I/O
//! - **Supervisor task**: spawns the worker, joins it, finalizes exactly once
//! - **Worker**: extract metadata, then fetch with a progress callback
//!
//! # State machine
//!
//! ```text
//! Idle -> ExtractingMetadata -> Fetching -> Completed -> Idle
//!                 |                |-----> Cancelled -> Idle
//!                 '----------------'-----> Failed    -> Idle
//! ```
//!
//! The slot returns to `Idle` on every path, including a panicking worker,
//! and only then is the job ticket resolved.

mod slot;
mod worker;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use tokio::runtime::Handle;
use tokio::sync::{oneshot, watch};

use mediagrab_core::download::{Job, JobError, JobId, JobRequest, JobState, UiEvent};
use mediagrab_core::ports::{EventEmitterPort, HistoryRepositoryPort, MediaFetcherPort};
use mediagrab_core::settings::HistoryEntry;

use crate::format::resolve_format;

use slot::{ActiveJob, CancelRequest, JobSlot};
use worker::{JobOutcome, WorkerDeps, WorkerJob, run_job};

/// Dependencies for building a [`JobController`].
pub struct JobControllerDeps {
    pub fetcher: Arc<dyn MediaFetcherPort>,
    pub history: Arc<dyn HistoryRepositoryPort>,
    pub emitter: Arc<dyn EventEmitterPort>,
    /// Runtime the supervisor and worker tasks are spawned on.
    pub runtime: Handle,
}

/// Build a job controller from its dependencies.
pub fn build_job_controller(deps: JobControllerDeps) -> JobController {
    JobController {
        shared: Arc::new(Shared {
            slot: Arc::new(JobSlot::new()),
            fetcher: deps.fetcher,
            history: deps.history,
            emitter: deps.emitter,
        }),
        runtime: deps.runtime,
    }
}

struct Shared {
    slot: Arc<JobSlot>,
    fetcher: Arc<dyn MediaFetcherPort>,
    history: Arc<dyn HistoryRepositoryPort>,
    emitter: Arc<dyn EventEmitterPort>,
}

/// Handle to an accepted job.
///
/// Resolves with the terminal snapshot once the slot is back to `Idle`.
#[derive(Debug)]
pub struct JobTicket {
    id: JobId,
    done: oneshot::Receiver<Job>,
}

impl JobTicket {
    pub const fn id(&self) -> JobId {
        self.id
    }

    /// Wait for the job to finish.
    ///
    /// Returns `None` only if the runtime shut down before the job ended.
    pub async fn finished(self) -> Option<Job> {
        self.done.await.ok()
    }
}

/// State machine owning at most one active job.
#[derive(Clone)]
pub struct JobController {
    shared: Arc<Shared>,
    runtime: Handle,
}

impl JobController {
    /// Submit a job.
    ///
    /// Fails with `ConcurrentJob` whenever the slot is occupied, whatever the
    /// request; otherwise with `InvalidRequest` for an empty URL or a target
    /// directory that does not exist. On success the job is in
    /// `ExtractingMetadata` before this returns.
    pub fn start(&self, request: JobRequest) -> Result<JobTicket, JobError> {
        let slot = &self.shared.slot;
        let mut guard = slot.lock();

        if let Some(active) = guard.as_ref() {
            tracing::debug!(
                target: "mediagrab.download",
                active = %active.job.id,
                "start rejected, job in flight"
            );
            return Err(JobError::concurrent_job(active.job.id.to_string()));
        }

        let request = validate_request(request)?;
        let plan = resolve_format(request.media_type, request.quality);
        let job = Job::accepted(request);
        let id = job.id;
        let cancel = Arc::new(AtomicBool::new(false));

        let worker_job = WorkerJob {
            id,
            url: job.url.clone(),
            target_dir: job.target_dir.clone(),
            plan,
            cancel: Arc::clone(&cancel),
        };

        tracing::info!(
            target: "mediagrab.download",
            job_id = %id,
            url = %job.url,
            media_type = %job.media_type,
            quality = %job.quality,
            format = %worker_job.plan.format_spec,
            "job accepted"
        );

        slot.occupy(&mut guard, ActiveJob { job, cancel });
        drop(guard);

        let (done_tx, done) = oneshot::channel();
        let shared = Arc::clone(&self.shared);
        self.runtime
            .spawn(async move { shared.supervise(worker_job, done_tx).await });

        Ok(JobTicket { id, done })
    }

    /// Request cooperative cancellation of the running job.
    ///
    /// Returns immediately. Repeated requests are accepted without a second
    /// acknowledgement.
    pub fn cancel(&self) -> Result<(), JobError> {
        match self.shared.slot.request_cancel() {
            CancelRequest::Raised(id) => {
                tracing::info!(target: "mediagrab.download", job_id = %id, "cancellation requested");
                self.shared
                    .emitter
                    .emit(UiEvent::log("Cancellation requested."));
                self.shared
                    .emitter
                    .emit(UiEvent::status("Cancelling download...", None));
                Ok(())
            }
            CancelRequest::AlreadyRequested(_) => Ok(()),
            CancelRequest::NoActiveJob => Err(JobError::NoActiveJob),
        }
    }

    pub fn state(&self) -> JobState {
        self.shared.slot.state()
    }

    /// Snapshot of the job in the slot, if any.
    pub fn current_job(&self) -> Option<Job> {
        self.shared.slot.current()
    }

    /// Watch state transitions.
    pub fn subscribe_state(&self) -> watch::Receiver<JobState> {
        self.shared.slot.subscribe()
    }
}

impl Shared {
    async fn supervise(self: Arc<Self>, job: WorkerJob, done: oneshot::Sender<Job>) {
        let id = job.id;
        let deps = WorkerDeps {
            fetcher: Arc::clone(&self.fetcher),
            emitter: Arc::clone(&self.emitter),
            slot: Arc::clone(&self.slot),
        };

        let outcome = match tokio::spawn(run_job(job, deps)).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(target: "mediagrab.download", job_id = %id, error = %e, "worker task failed");
                JobOutcome::Failed(JobError::fetch(format!("worker task failed: {e}")))
            }
        };

        self.finalize(id, outcome, done).await;
    }

    /// Terminal transition, history, notices, then back to `Idle`.
    async fn finalize(&self, id: JobId, outcome: JobOutcome, done: oneshot::Sender<Job>) {
        let snapshot = match outcome {
            JobOutcome::Completed { title } => {
                let snapshot = self.slot.conclude(id, |job| job.complete(title.clone()));
                tracing::info!(target: "mediagrab.download", job_id = %id, %title, "job completed");
                if let Some(job) = &snapshot {
                    self.record_history(job, &title).await;
                }
                self.emitter
                    .emit(UiEvent::log(format!("Download complete: {title}")));
                self.emitter
                    .emit(UiEvent::status("Download complete!", Some(100)));
                snapshot
            }
            JobOutcome::Cancelled => {
                let snapshot = self.slot.conclude(id, Job::cancel);
                tracing::info!(target: "mediagrab.download", job_id = %id, "job cancelled");
                let err = JobError::Aborted;
                self.emitter
                    .emit(UiEvent::log("Download cancelled by user."));
                self.emitter
                    .emit(UiEvent::info(err.notice_title(), err.user_message()));
                self.emitter
                    .emit(UiEvent::status("Download cancelled.", Some(0)));
                snapshot
            }
            JobOutcome::Failed(err) => {
                let snapshot = self.slot.conclude(id, |job| job.fail(err.to_string()));
                tracing::warn!(target: "mediagrab.download", job_id = %id, error = %err, "job failed");
                self.emitter
                    .emit(UiEvent::error(err.notice_title(), err.user_message()));
                self.emitter.emit(UiEvent::status("Download error.", Some(0)));
                snapshot
            }
        };

        self.slot.release(id);
        self.emitter.emit(UiEvent::status("Ready", Some(0)));

        if let Some(job) = snapshot {
            let _ = done.send(job);
        }
    }

    /// Append a history entry. Failure is logged and never changes the outcome.
    ///
    /// The store writes synchronously, so the append runs on the blocking pool.
    async fn record_history(&self, job: &Job, title: &str) {
        let entry = HistoryEntry::completed_now(title, job.media_type);
        let history = Arc::clone(&self.history);
        match tokio::task::spawn_blocking(move || history.append(entry)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::warn!(target: "mediagrab.download", job_id = %job.id, error = %e, "history not saved");
                self.emitter.emit(UiEvent::log(e.user_message()));
            }
            Err(e) => {
                tracing::error!(target: "mediagrab.download", job_id = %job.id, error = %e, "history task failed");
            }
        }
    }
}

/// Check a request and canonicalize its target directory.
fn validate_request(mut request: JobRequest) -> Result<JobRequest, JobError> {
    let url = request.url.trim();
    if url.is_empty() {
        return Err(JobError::invalid_request("URL must not be empty"));
    }
    request.url = url.to_string();
    request.target_dir = canonical_target_dir(&request.target_dir)?;
    Ok(request)
}

fn canonical_target_dir(dir: &Path) -> Result<PathBuf, JobError> {
    if dir.as_os_str().is_empty() {
        return Err(JobError::invalid_request("target directory must not be empty"));
    }

    let canonical = dir.canonicalize().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => JobError::invalid_request(format!(
            "target directory {} does not exist",
            dir.display()
        )),
        _ => JobError::invalid_request(format!(
            "target directory {} is not accessible: {e}",
            dir.display()
        )),
    })?;

    if !canonical.is_dir() {
        return Err(JobError::invalid_request(format!(
            "{} is not a directory",
            dir.display()
        )));
    }
    Ok(canonical)
}
