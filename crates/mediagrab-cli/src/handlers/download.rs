//! Download handler.
//!
//! Submits one job to the controller, renders its events until the job
//! ticket resolves and turns the terminal state into the exit status.
//! The first Ctrl+C requests cooperative cancellation; a second one abandons
//! the job and exits.

use anyhow::Result;

use mediagrab_core::download::{Job, JobRequest, JobState, MediaType, UiEvent};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::StatusPrinter;

/// Download command arguments passed from CLI.
pub struct DownloadArgs {
    pub url: String,
    pub format: MediaType,
    pub quality: Option<String>,
    pub dir: Option<String>,
}

/// Execute the download command.
pub async fn execute(ctx: &CliContext, args: DownloadArgs) -> Result<()> {
    let target = ctx.downloads_dir(args.dir.as_deref())?;
    let quality = args
        .quality
        .unwrap_or_else(|| args.format.default_quality().to_string());
    let request = JobRequest::from_raw(args.url, &target.path, args.format, &quality)
        .map_err(CliError::from)?;

    let (controller, mut events) = ctx.job_controller()?;
    let ticket = controller.start(request).map_err(CliError::from)?;
    tracing::debug!(job_id = %ticket.id(), dir = %target.path.display(), "download started");

    let ticket_id = ticket.id();
    let mut printer = StatusPrinter::new();
    let finished = ticket.finished();
    tokio::pin!(finished);
    let mut interrupts = Interrupts::default();
    let mut listen_for_signals = true;

    let job = loop {
        tokio::select! {
            Some(event) = events.recv() => printer.handle(&event),
            signal = tokio::signal::ctrl_c(), if listen_for_signals => {
                if let Err(e) = signal {
                    tracing::warn!(error = %e, "failed to listen for Ctrl+C");
                    listen_for_signals = false;
                    continue;
                }
                match interrupts.next() {
                    Interrupt::Cancel => {
                        printer.handle(&UiEvent::log("Press Ctrl+C again to quit immediately."));
                        if let Err(e) = controller.cancel() {
                            tracing::debug!(error = %e, "cancel ignored");
                        }
                    }
                    Interrupt::Abandon => {
                        // Runtime shutdown drops the worker, which kills yt-dlp.
                        printer.finish();
                        tracing::warn!(job_id = %ticket_id, "download abandoned");
                        return Err(CliError::Cancelled.into());
                    }
                }
            }
            job = &mut finished => break job,
        }
    };

    // Events emitted before the ticket resolved are still queued.
    while let Ok(event) = events.try_recv() {
        printer.handle(&event);
    }
    printer.finish();

    let job = job.ok_or_else(|| CliError::Download("download task ended unexpectedly".into()))?;
    report(&job, &target.path.display().to_string())
}

/// What a Ctrl+C means at this point of the download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interrupt {
    Cancel,
    Abandon,
}

#[derive(Debug, Default)]
struct Interrupts {
    seen: u32,
}

impl Interrupts {
    fn next(&mut self) -> Interrupt {
        self.seen = self.seen.saturating_add(1);
        if self.seen == 1 {
            Interrupt::Cancel
        } else {
            Interrupt::Abandon
        }
    }
}

fn report(job: &Job, dir: &str) -> Result<()> {
    match job.state {
        JobState::Completed => {
            let title = job.result_title.as_deref().unwrap_or("download");
            println!("✓ Saved \"{title}\" to {dir}");
            Ok(())
        }
        JobState::Cancelled => Err(CliError::Cancelled.into()),
        JobState::Failed => Err(CliError::Download(
            job.failure_reason
                .clone()
                .unwrap_or_else(|| "download failed".to_string()),
        )
        .into()),
        JobState::Idle | JobState::ExtractingMetadata | JobState::Fetching => Err(
            CliError::Download(format!("download ended in unexpected state {}", job.state)).into(),
        ),
    }
}
