//! History repository port.

use crate::download::JobError;
use crate::settings::HistoryEntry;

/// Bounded log of completed downloads.
///
/// Calls are synchronous and short: the implementation rewrites a small
/// document and never holds a lock across an await point.
pub trait HistoryRepositoryPort: Send + Sync {
    /// Append a completed download and persist the log.
    ///
    /// The entry stays in memory even when persisting fails; the error is
    /// reported as `JobError::HistoryIo`.
    fn append(&self, entry: HistoryEntry) -> Result<(), JobError>;

    /// The last `n` entries, most recent first.
    fn recent(&self, n: usize) -> Vec<HistoryEntry>;

    /// Number of entries currently held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
