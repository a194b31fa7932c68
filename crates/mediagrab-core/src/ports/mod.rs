//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No process or filesystem details in any signature
//! - Fetcher errors are already mapped to `JobError`
//! - Emitters never block and never fail

pub mod event_emitter;
pub mod history;
pub mod media_fetcher;

pub use event_emitter::{EventEmitterPort, NoopEmitter};
pub use history::HistoryRepositoryPort;
pub use media_fetcher::{FetchOutcome, FetchRequest, MediaFetcherPort, ProgressCallback};
