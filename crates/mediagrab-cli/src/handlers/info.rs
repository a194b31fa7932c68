//! Info handler: metadata-only extraction.

use anyhow::Result;

use mediagrab_core::download::JobError;
use mediagrab_core::ports::MediaFetcherPort;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::display_metadata;

/// Execute the info command.
pub async fn execute(ctx: &CliContext, url: &str) -> Result<()> {
    let url = url.trim();
    if url.is_empty() {
        return Err(CliError::from(JobError::invalid_request("URL must not be empty")).into());
    }

    let fetcher = ctx.fetcher()?;
    let metadata = fetcher
        .extract_metadata(url)
        .await
        .map_err(CliError::from)?;

    display_metadata(&metadata);
    Ok(())
}
