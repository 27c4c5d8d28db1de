//! Name-addressed runtime settings for embedded firmware
//!
//! Independently compiled modules register a [`Handler`] that owns one
//! top-level name. Values arrive as text (from flash, a management protocol
//! or a console), are routed by name to the owning handler, and are applied
//! later by a commit:
//!
//! ```text
//!  "net/port" = "8080"
//!        │
//!        ▼
//! ┌──────────────┐   ┌──────────┐   ┌──────────────────────┐
//! │ name parser  │──▶│ registry │──▶│ handler "net"        │
//! └──────────────┘   └──────────┘   │  set(["port"], ...)  │
//!                                   │  commit()            │
//!                                   └──────────────────────┘
//! ```
//!
//! - [`value`] - text <-> typed value codec
//! - [`name`] - hierarchical name splitting
//! - [`registry`] - handler collection
//! - [`settings`] - lock-guarded façade
//! - [`lifecycle`] - deferred load from a [`Store`]
//! - [`staged`] - staged/active cell for handler authors

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod error;
pub mod handler;
pub mod lifecycle;
pub mod name;
pub mod registry;
pub mod settings;
pub mod staged;
pub mod value;

#[cfg(test)]
mod test_support;

pub use error::Error;
pub use handler::{Capabilities, ExportTarget, Handler};
pub use lifecycle::{ConfigSystem, LoadEvent, LoadReport, LoadState, Scheduler, Store, StoreError};
pub use name::{parse_name, NamePath, MAX_NAME_DEPTH, NAME_SEPARATOR};
pub use settings::Settings;
pub use staged::Staged;
pub use value::{Value, ValueType};
