//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub fn execute(ctx: &CliContext, ...) -> Result<()>`
//!   (`async` when they talk to yt-dlp)
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call the controller, fetcher or history store
//!   3. Format output for the terminal
//!
//! Handlers should NOT:
//! - Run yt-dlp directly
//! - Read or write the configuration document themselves

pub mod config;
pub mod download;
pub mod formats;
pub mod history;
pub mod info;
pub mod open;
