//! The single job slot.
//!
//! Holds at most one job in a non-idle state, its cancel flag and the state
//! watch channel. The mutex is never held across an await point.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use mediagrab_core::download::{Job, JobId, JobState};

/// The job occupying the slot and its cooperative cancel flag.
pub(crate) struct ActiveJob {
    pub job: Job,
    pub cancel: Arc<AtomicBool>,
}

/// Outcome of a cancel request against the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CancelRequest {
    /// The flag was raised by this call.
    Raised(JobId),
    /// The flag was already set; nothing changed.
    AlreadyRequested(JobId),
    /// No running job.
    NoActiveJob,
}

pub(crate) struct JobSlot {
    active: Mutex<Option<ActiveJob>>,
    state_tx: watch::Sender<JobState>,
}

impl JobSlot {
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(JobState::Idle);
        Self {
            active: Mutex::new(None),
            state_tx,
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, Option<ActiveJob>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Place an accepted job in the slot. The caller holds the guard and has
    /// checked that the slot is empty.
    pub fn occupy(&self, guard: &mut MutexGuard<'_, Option<ActiveJob>>, active: ActiveJob) {
        let state = active.job.state;
        **guard = Some(active);
        self.state_tx.send_replace(state);
    }

    pub fn state(&self) -> JobState {
        *self.state_tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<JobState> {
        self.state_tx.subscribe()
    }

    pub fn current(&self) -> Option<Job> {
        self.lock().as_ref().map(|active| active.job.clone())
    }

    /// Move the job `id` to a non-terminal state.
    pub fn set_state(&self, id: JobId, state: JobState) {
        let mut guard = self.lock();
        if let Some(active) = guard.as_mut().filter(|a| a.job.id == id) {
            active.job.state = state;
            self.state_tx.send_replace(state);
        }
    }

    /// Apply a terminal transition to job `id` and return the snapshot.
    pub fn conclude(&self, id: JobId, apply: impl FnOnce(&mut Job)) -> Option<Job> {
        let mut guard = self.lock();
        let active = guard.as_mut().filter(|a| a.job.id == id)?;
        apply(&mut active.job);
        self.state_tx.send_replace(active.job.state);
        Some(active.job.clone())
    }

    /// Raise the cancel flag of a running job.
    pub fn request_cancel(&self) -> CancelRequest {
        let guard = self.lock();
        match guard.as_ref() {
            Some(active) if !active.job.state.is_terminal() => {
                if active.cancel.swap(true, Ordering::SeqCst) {
                    CancelRequest::AlreadyRequested(active.job.id)
                } else {
                    CancelRequest::Raised(active.job.id)
                }
            }
            _ => CancelRequest::NoActiveJob,
        }
    }

    /// Empty the slot (if it still holds `id`), clear the flag and go idle.
    pub fn release(&self, id: JobId) {
        let mut guard = self.lock();
        if guard.as_ref().is_some_and(|a| a.job.id == id) {
            if let Some(active) = guard.take() {
                active.cancel.store(false, Ordering::SeqCst);
            }
            self.state_tx.send_replace(JobState::Idle);
        }
    }
}
