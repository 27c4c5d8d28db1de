//! Deferred load scheduling

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;

/// Token for the one-shot initial load
///
/// Only [`ConfigSystem::init`](super::ConfigSystem::init) creates one, and
/// [`ConfigSystem::run_deferred_load`](super::ConfigSystem::run_deferred_load)
/// consumes it, so the load can run at most once.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoadEvent {
    _private: (),
}

impl LoadEvent {
    pub(crate) const fn new() -> Self {
        Self { _private: () }
    }
}

/// Runs the deferred load once start-up code has finished registering
pub trait Scheduler {
    /// Queue `event`; it must be handed back to `run_deferred_load` later
    fn schedule_once(&self, event: LoadEvent);
}

/// A task awaiting the signal runs the load on the executor
impl<M: RawMutex> Scheduler for Signal<M, LoadEvent> {
    fn schedule_once(&self, event: LoadEvent) {
        self.signal(event);
    }
}
