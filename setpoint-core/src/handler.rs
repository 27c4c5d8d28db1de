//! Handler trait implemented by modules that own configuration

use crate::error::Error;

/// Operations a handler implements
///
/// The façade checks these before calling into the handler, so a handler
/// only needs to override the trait methods it declares here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Capabilities {
    pub get: bool,
    pub set: bool,
    pub commit: bool,
    pub export: bool,
}

impl Capabilities {
    /// All four operations
    pub const ALL: Self = Self {
        get: true,
        set: true,
        commit: true,
        export: true,
    };

    /// Get and set only; values take effect immediately
    pub const GET_SET: Self = Self {
        get: true,
        set: true,
        commit: false,
        export: false,
    };
}

/// Why a handler is being asked to export its values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExportTarget {
    /// Values are about to be written to persistent storage
    Persist,
    /// Values are about to be shown to a user; secrets may be withheld
    Show,
}

/// A module's configuration namespace
///
/// Every method runs with the global settings lock held. Implementations
/// must be short, must not block, and must not call back into the
/// [`Settings`](crate::Settings) they are registered with.
///
/// Handlers are shared by reference, so any state they mutate lives behind
/// interior mutability (see [`Staged`](crate::Staged)).
pub trait Handler: Sync {
    /// Top-level name owned by this handler
    fn name(&self) -> &str;

    /// Operations this handler supports
    fn capabilities(&self) -> Capabilities;

    /// Render the value at `path` into `buf` and return the written text
    fn get<'b>(&self, _path: &[&str], _buf: &'b mut [u8]) -> Result<&'b str, Error> {
        Err(Error::Unsupported)
    }

    /// Stage `value` for `path`
    ///
    /// Type interpretation is entirely up to the handler.
    fn set(&self, _path: &[&str], _value: &str) -> Result<(), Error> {
        Err(Error::Unsupported)
    }

    /// Apply previously staged values
    fn commit(&self) -> Result<(), Error> {
        Ok(())
    }

    /// Emit fully qualified `(name, value)` pairs to `sink`
    fn export(&self, _target: ExportTarget, _sink: &mut dyn FnMut(&str, &str)) -> Result<(), Error> {
        Ok(())
    }
}
