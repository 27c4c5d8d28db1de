//! Settings lifecycle
//!
//! Start-up runs in two phases. `init` creates the registry and schedules a
//! one-shot load; modules register handlers in the meantime. When the
//! scheduler runs the load, every persisted record is replayed through
//! [`Settings::set`] and then all handlers are committed once.
//!
//! ```text
//! Uninitialized ──init──▶ Registering ──load fires──▶ LoadPending ──▶ Loaded
//! ```

mod scheduler;
mod store;

use alloc::string::String;
use alloc::vec::Vec;
use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::error::Error;
use crate::handler::{ExportTarget, Handler};
use crate::settings::Settings;

pub use scheduler::{LoadEvent, Scheduler};
pub use store::{Store, StoreError};

/// Initial-load progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadState {
    /// Constructed, load not yet scheduled
    Uninitialized,
    /// Load scheduled, handlers registering
    Registering,
    /// Persisted records being applied
    LoadPending,
    /// Records applied and committed
    Loaded,
}

/// Outcome of the deferred load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoadReport {
    /// Records accepted by their handler
    pub applied: usize,
    /// Records rejected (unknown name, bad value, handler error)
    pub skipped: usize,
    /// Result of iterating the store
    pub store: Result<(), StoreError>,
    /// Result of the global commit
    pub commit: Result<(), Error>,
}

/// Owns the settings registry and drives the initial load
pub struct ConfigSystem<'a, M: RawMutex> {
    settings: Settings<'a, M>,
    state: Mutex<M, Cell<LoadState>>,
}

impl<'a, M: RawMutex> Default for ConfigSystem<'a, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, M: RawMutex> ConfigSystem<'a, M> {
    /// Create an uninitialized system with an empty registry
    pub const fn new() -> Self {
        Self {
            settings: Settings::new(),
            state: Mutex::new(Cell::new(LoadState::Uninitialized)),
        }
    }

    /// Settings façade for get/set/commit/export
    pub fn settings(&self) -> &Settings<'a, M> {
        &self.settings
    }

    pub fn state(&self) -> LoadState {
        self.state.lock(Cell::get)
    }

    pub fn is_loaded(&self) -> bool {
        self.state() == LoadState::Loaded
    }

    /// Register a handler; allowed in any state
    pub fn register(&self, handler: &'a dyn Handler) {
        self.settings.register(handler);
    }

    /// Schedule the initial load
    ///
    /// Only the first call has an effect.
    pub fn init<S: Scheduler + ?Sized>(&self, scheduler: &S) {
        let first = self.state.lock(|state| {
            if state.get() == LoadState::Uninitialized {
                state.set(LoadState::Registering);
                true
            } else {
                false
            }
        });

        if !first {
            #[cfg(feature = "defmt")]
            defmt::warn!("settings: init called twice, ignoring");
            return;
        }

        scheduler.schedule_once(LoadEvent::new());
    }

    /// Apply every persisted record, then commit all handlers once
    ///
    /// A record that fails to apply is logged and skipped. The store is read
    /// without the settings lock held; each record takes the lock only for
    /// its own `set`.
    pub fn run_deferred_load<S: Store + ?Sized>(&self, _event: LoadEvent, store: &mut S) -> LoadReport {
        self.state.lock(|state| state.set(LoadState::LoadPending));

        #[cfg(feature = "defmt")]
        defmt::info!("settings: loading from store");

        let mut applied = 0;
        let mut skipped = 0;
        let store_result = store.for_each_record(&mut |name: &str, value: &str| {
            match self.settings.set(name, value) {
                Ok(()) => applied += 1,
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("settings: skipping '{}': {}", name, _e);
                    skipped += 1;
                }
            }
        });

        if let Err(_e) = store_result {
            #[cfg(feature = "defmt")]
            defmt::warn!("settings: store read failed: {}", _e);
        }

        let commit = self.settings.commit(None);
        self.state.lock(|state| state.set(LoadState::Loaded));

        #[cfg(feature = "defmt")]
        defmt::info!("settings: loaded {} records, skipped {}", applied, skipped);

        LoadReport {
            applied,
            skipped,
            store: store_result,
            commit,
        }
    }

    /// Write every persistable value to `store`
    ///
    /// Values are exported under the settings lock into a local list, and
    /// the store is written after the lock is released. Every record is
    /// attempted; the first store error is returned. On success returns the
    /// number of records written.
    pub fn save<S: Store + ?Sized>(&self, store: &mut S) -> Result<usize, StoreError> {
        let mut records: Vec<(String, String)> = Vec::new();
        if let Err(_e) = self
            .settings
            .export(ExportTarget::Persist, |name, value| records.push((name.into(), value.into())))
        {
            #[cfg(feature = "defmt")]
            defmt::warn!("settings: export incomplete: {}", _e);
        }

        let mut outcome = Ok(0);
        for (name, value) in &records {
            match store.save(name, value) {
                Ok(()) => {
                    if let Ok(written) = outcome.as_mut() {
                        *written += 1;
                    }
                }
                Err(e) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("settings: saving '{}' failed: {}", name.as_str(), e);
                    if outcome.is_ok() {
                        outcome = Err(e);
                    }
                }
            }
        }
        outcome
    }
}
