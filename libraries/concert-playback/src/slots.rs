//! Dual audio slots
//!
//! Two slots hold at most one audio unit each. At most one slot is active;
//! the other is the standby used for look-ahead buffering.

use crate::unit::AudioUnit;
use serde::{Deserialize, Serialize};

/// Identifier of one of the two slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotId {
    /// First slot
    A,

    /// Second slot
    B,
}

impl SlotId {
    /// The other slot
    pub fn other(self) -> Self {
        match self {
            SlotId::A => SlotId::B,
            SlotId::B => SlotId::A,
        }
    }

    fn index(self) -> usize {
        match self {
            SlotId::A => 0,
            SlotId::B => 1,
        }
    }
}

/// Indexed pair of audio slots with an explicit active index
#[derive(Debug, Default)]
pub struct Slots {
    units: [Option<AudioUnit>; 2],
    active: Option<SlotId>,
}

impl Slots {
    /// Create an empty pair with no active slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently active slot, if anything has played
    pub fn active(&self) -> Option<SlotId> {
        self.active
    }

    /// Slot that the next selection will use
    ///
    /// Alternates from the active slot; starts with `A`.
    pub fn next_slot(&self) -> SlotId {
        self.active.map_or(SlotId::A, SlotId::other)
    }

    /// Standby slot (the non-active one), if a slot is active
    pub fn standby(&self) -> Option<SlotId> {
        self.active.map(SlotId::other)
    }

    /// Mark a slot active, or none
    pub fn set_active(&mut self, slot: Option<SlotId>) {
        self.active = slot;
    }

    /// Unit in a slot
    pub fn get(&self, slot: SlotId) -> Option<&AudioUnit> {
        self.units[slot.index()].as_ref()
    }

    /// Mutable unit in a slot
    pub fn get_mut(&mut self, slot: SlotId) -> Option<&mut AudioUnit> {
        self.units[slot.index()].as_mut()
    }

    /// Active unit
    pub fn active_unit(&self) -> Option<&AudioUnit> {
        self.active.and_then(|slot| self.get(slot))
    }

    /// Mutable active unit
    pub fn active_unit_mut(&mut self) -> Option<&mut AudioUnit> {
        let slot = self.active?;
        self.get_mut(slot)
    }

    /// Put a unit into a slot, returning the unit it replaced
    pub fn replace(&mut self, slot: SlotId, unit: AudioUnit) -> Option<AudioUnit> {
        self.units[slot.index()].replace(unit)
    }

    /// Remove the unit from a slot
    pub fn take(&mut self, slot: SlotId) -> Option<AudioUnit> {
        self.units[slot.index()].take()
    }

    /// Apply `f` to every live unit
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut AudioUnit)) {
        for unit in self.units.iter_mut().flatten() {
            f(unit);
        }
    }

    /// Drop both units and forget the active slot
    pub fn clear(&mut self) {
        self.units = [None, None];
        self.active = None;
    }
}
