//! Staged/active value cell
//!
//! Handlers usually accept a value in `set` and only act on it in `commit`.
//! `Staged` keeps both copies behind an embassy blocking mutex so a handler
//! can be shared by reference with the settings registry while application
//! code keeps reading the active value.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

#[derive(Debug, Clone, Copy)]
struct Slots<T> {
    staged: T,
    active: T,
    dirty: bool,
}

/// A value with a pending (staged) and an applied (active) copy
pub struct Staged<M: RawMutex, T: Copy> {
    slots: Mutex<M, Cell<Slots<T>>>,
}

impl<M: RawMutex, T: Copy> Staged<M, T> {
    /// Create a cell where both copies start at `value`
    pub const fn new(value: T) -> Self {
        Self {
            slots: Mutex::new(Cell::new(Slots {
                staged: value,
                active: value,
                dirty: false,
            })),
        }
    }

    /// Replace the staged value
    pub fn stage(&self, value: T) {
        self.slots.lock(|cell| {
            let mut slots = cell.get();
            slots.staged = value;
            slots.dirty = true;
            cell.set(slots);
        });
    }

    /// Value that the next [`apply`](Self::apply) will make active
    pub fn staged(&self) -> T {
        self.slots.lock(|cell| cell.get().staged)
    }

    /// Value currently in effect
    pub fn active(&self) -> T {
        self.slots.lock(|cell| cell.get().active)
    }

    /// True if a value was staged since the last apply
    pub fn is_dirty(&self) -> bool {
        self.slots.lock(|cell| cell.get().dirty)
    }

    /// Promote the staged value to active
    ///
    /// Returns `true` if something had been staged.
    pub fn apply(&self) -> bool {
        self.slots.lock(|cell| {
            let mut slots = cell.get();
            let was_dirty = slots.dirty;
            slots.active = slots.staged;
            slots.dirty = false;
            cell.set(slots);
            was_dirty
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

    #[test]
    fn test_stage_then_apply() {
        let port: Staged<CriticalSectionRawMutex, i32> = Staged::new(0);
        assert!(!port.is_dirty());

        port.stage(8080);
        assert_eq!(port.staged(), 8080);
        assert_eq!(port.active(), 0);
        assert!(port.is_dirty());

        assert!(port.apply());
        assert_eq!(port.active(), 8080);
        assert!(!port.is_dirty());
    }

    #[test]
    fn test_apply_without_stage() {
        let flag: Staged<CriticalSectionRawMutex, bool> = Staged::new(true);
        assert!(!flag.apply());
        assert!(flag.active());
    }

    #[test]
    fn test_restage_before_apply() {
        let level: Staged<CriticalSectionRawMutex, u8> = Staged::new(1);
        level.stage(2);
        level.stage(3);
        level.apply();
        assert_eq!(level.active(), 3);
    }
}
