//! Persisted record store
//!
//! The on-media format, wear levelling and compaction belong to the
//! implementation; the settings core only replays and appends text records.

/// Errors from a settings store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Record does not fit the store's buffers
    BufferTooSmall,
    /// Record data corrupted or invalid
    Corrupted,
    /// Storage is full
    Full,
}

/// Backing store of persisted `name=value` records
pub trait Store {
    /// Call `f` for every persisted record, oldest first
    ///
    /// Later records for the same name override earlier ones simply by being
    /// applied later.
    fn for_each_record(&mut self, f: &mut dyn FnMut(&str, &str)) -> Result<(), StoreError>;

    /// Append a record
    fn save(&mut self, name: &str, value: &str) -> Result<(), StoreError>;
}
