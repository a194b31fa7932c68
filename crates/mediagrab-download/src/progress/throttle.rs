//! Progress throttling.
//!
//! Rate-limits status updates so a terminal or GUI is not redrawn for every
//! fetcher line. Phase changes always pass.

use std::time::{Duration, Instant};

use mediagrab_core::download::ProgressPhase;

/// Rate-limiter for progress updates.
pub struct ProgressThrottle {
    last_emit: Option<Instant>,
    last_phase: Option<ProgressPhase>,
    min_interval: Duration,
}

impl ProgressThrottle {
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            last_emit: None,
            last_phase: None,
            min_interval,
        }
    }

    /// Create a throttle with a default interval of 100ms.
    pub const fn default_interval() -> Self {
        Self::new(Duration::from_millis(100))
    }

    /// Whether an update in `phase` should be rendered now.
    ///
    /// The first update, any phase change and any update after the interval
    /// has elapsed pass; everything else is dropped.
    pub fn should_emit(&mut self, phase: ProgressPhase) -> bool {
        let now = Instant::now();
        let phase_changed = self.last_phase != Some(phase);
        let due = self
            .last_emit
            .is_none_or(|last| now.duration_since(last) >= self.min_interval);

        if phase_changed || due {
            self.last_emit = Some(now);
            self.last_phase = Some(phase);
            true
        } else {
            false
        }
    }

    /// Force the next check to return true.
    pub const fn reset(&mut self) {
        self.last_emit = None;
        self.last_phase = None;
    }
}

impl Default for ProgressThrottle {
    fn default() -> Self {
        Self::default_interval()
    }
}
