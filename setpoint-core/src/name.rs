//! Hierarchical setting names
//!
//! A name such as `"net/wifi/ssid"` is split into segments. The first
//! segment selects the handler; the rest are passed to it untouched.

use heapless::Vec;

use crate::error::Error;

/// Separator between name segments
pub const NAME_SEPARATOR: char = '/';

/// Maximum number of segments in a name
pub const MAX_NAME_DEPTH: usize = 8;

/// A parsed name, borrowing the segments from the original string
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NamePath<'a> {
    segments: Vec<&'a str, MAX_NAME_DEPTH>,
}

impl<'a> NamePath<'a> {
    /// All segments in order
    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    /// First segment (the handler name), if any
    pub fn first(&self) -> Option<&'a str> {
        self.segments.first().copied()
    }

    /// Segments after the first; empty for a bare handler name
    pub fn rest(&self) -> &[&'a str] {
        self.segments.get(1..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Split `name` on [`NAME_SEPARATOR`]
///
/// Empty segments (leading, trailing or repeated separators) are dropped.
/// An empty result is not an error here; callers that need a handler treat
/// it as [`Error::InvalidName`]. Names deeper than [`MAX_NAME_DEPTH`] fail.
pub fn parse_name(name: &str) -> Result<NamePath<'_>, Error> {
    let mut segments = Vec::new();
    for segment in name.split(NAME_SEPARATOR).filter(|s| !s.is_empty()) {
        segments.push(segment).map_err(|_| Error::InvalidName)?;
    }
    Ok(NamePath { segments })
}
