//! History handler.

use anyhow::Result;

use mediagrab_core::ports::HistoryRepositoryPort;

use crate::bootstrap::CliContext;
use crate::presentation::display_history;

/// Show the `limit` most recent completed downloads.
pub fn execute(ctx: &CliContext, limit: usize) -> Result<()> {
    let entries = ctx.history().recent(limit);
    display_history(&entries);
    Ok(())
}
