//! Settings façade
//!
//! Routes name/value operations to the owning handler. Every call holds the
//! single registry lock for its whole duration, so concurrent callers (a
//! console task and a management task, say) are fully serialized.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::error::Error;
use crate::handler::{ExportTarget, Handler};
use crate::name::{parse_name, NamePath};
use crate::registry::Registry;

/// Name-addressed access to all registered handlers
///
/// `M` selects the raw mutex guarding the registry, e.g.
/// `CriticalSectionRawMutex` when settings are touched from interrupts or
/// multiple executors.
pub struct Settings<'a, M: RawMutex> {
    registry: Mutex<M, RefCell<Registry<'a>>>,
}

impl<'a, M: RawMutex> Default for Settings<'a, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, M: RawMutex> Settings<'a, M> {
    /// Create settings with no handlers
    pub const fn new() -> Self {
        Self {
            registry: Mutex::new(RefCell::new(Registry::new())),
        }
    }

    /// Register a handler
    ///
    /// Names are not checked for duplicates; lookups return the first
    /// handler registered under a name.
    pub fn register(&self, handler: &'a dyn Handler) {
        self.registry
            .lock(|registry| registry.borrow_mut().register(handler));
    }

    /// Number of registered handlers
    pub fn handler_count(&self) -> usize {
        self.registry.lock(|registry| registry.borrow().len())
    }

    /// Hand `value` to the handler owning `name`
    ///
    /// The value is not interpreted here; the handler's own error is
    /// returned unchanged.
    pub fn set(&self, name: &str, value: &str) -> Result<(), Error> {
        self.registry.lock(|registry| {
            let registry = registry.borrow();
            let (handler, path) = resolve(&registry, name)?;
            if !handler.capabilities().set {
                return Err(Error::Unsupported);
            }
            handler.set(path.rest(), value)
        })
    }

    /// Read the value of `name` as text
    ///
    /// The handler writes into `buf`; the returned text borrows `buf` only.
    pub fn get<'b>(&self, name: &str, buf: &'b mut [u8]) -> Result<&'b str, Error> {
        self.registry.lock(move |registry| {
            let registry = registry.borrow();
            let (handler, path) = resolve(&registry, name)?;
            if !handler.capabilities().get {
                return Err(Error::Unsupported);
            }
            handler.get(path.rest(), buf)
        })
    }

    /// Apply staged values
    ///
    /// With a name, commits only the owning handler; a handler without
    /// commit support succeeds trivially. Without a name, every handler that
    /// supports commit is called even if an earlier one fails, and the first
    /// failure is returned.
    pub fn commit(&self, name: Option<&str>) -> Result<(), Error> {
        self.registry.lock(|registry| {
            let registry = registry.borrow();
            match name {
                Some(name) => {
                    let (handler, _) = resolve(&registry, name)?;
                    if handler.capabilities().commit {
                        handler.commit()
                    } else {
                        Ok(())
                    }
                }
                None => first_error(
                    registry
                        .iter()
                        .filter(|h| h.capabilities().commit)
                        .map(|h| (h.name(), h.commit())),
                ),
            }
        })
    }

    /// Collect `(name, value)` pairs from every handler that supports export
    ///
    /// Runs every capable handler and returns the first failure, like a
    /// global [`commit`](Self::commit). The sink runs under the lock and
    /// must not block.
    pub fn export(&self, target: ExportTarget, mut sink: impl FnMut(&str, &str)) -> Result<(), Error> {
        self.registry.lock(|registry| {
            let registry = registry.borrow();
            first_error(
                registry
                    .iter()
                    .filter(|h| h.capabilities().export)
                    .map(|h| (h.name(), h.export(target, &mut sink))),
            )
        })
    }
}

fn resolve<'a, 'n>(registry: &Registry<'a>, name: &'n str) -> Result<(&'a dyn Handler, NamePath<'n>), Error> {
    let path = parse_name(name)?;
    let first = path.first().ok_or(Error::InvalidName)?;
    let handler = registry.lookup(first).ok_or(Error::UnknownName)?;
    Ok((handler, path))
}

/// Drain `results`, keeping the first error
fn first_error<'h>(results: impl Iterator<Item = (&'h str, Result<(), Error>)>) -> Result<(), Error> {
    let mut outcome = Ok(());
    for (_name, result) in results {
        if let Err(e) = result {
            #[cfg(feature = "defmt")]
            defmt::warn!("settings: handler '{}' failed: {}", _name, e);
            if outcome.is_ok() {
                outcome = Err(e);
            }
        }
    }
    outcome
}
