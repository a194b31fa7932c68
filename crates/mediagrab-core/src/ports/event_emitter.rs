//! Event emitter port.
//!
//! Lets the job controller report progress and notices without coupling to
//! a transport (channel, terminal, GUI event loop).

use crate::download::UiEvent;

/// Port for emitting UI events.
///
/// # Implementations
///
/// - `NoopEmitter` - For tests and contexts that don't render events
/// - `EventRelay` in `mediagrab-download` - unbounded channel to the UI surface
pub trait EventEmitterPort: Send + Sync {
    /// Emit an event.
    ///
    /// Must not block and must not fail: a consumer that went away is
    /// silently ignored.
    fn emit(&self, event: UiEvent);

    /// Clone this emitter into a boxed trait object.
    fn clone_box(&self) -> Box<dyn EventEmitterPort>;
}

/// An emitter that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEmitter;

impl NoopEmitter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl EventEmitterPort for NoopEmitter {
    fn emit(&self, _event: UiEvent) {}

    fn clone_box(&self) -> Box<dyn EventEmitterPort> {
        Box::new(*self)
    }
}
