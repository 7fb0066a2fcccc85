//! Flat indexing of the `(day, slot)` planning grid.
#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use serde::Serialize;

/// A position in the planning grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlotRef {
    pub day: u32,
    pub slot: u32,
}

/// The dimensions of the planning horizon.
///
/// Slots are numbered day-major: slot `s` of day `d` has flat index `d * slots_per_day + s`. Every
/// per-slot vector in the crate is laid out this way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Grid {
    num_days: u32,
    slots_per_day: u32,
}

impl Grid {
    pub(crate) fn new(num_days: u32, slots_per_day: u32) -> Grid {
        Grid {
            num_days,
            slots_per_day,
        }
    }

    pub(crate) fn num_days(&self) -> u32 {
        self.num_days
    }

    pub(crate) fn slots_per_day(&self) -> u32 {
        self.slots_per_day
    }

    pub(crate) fn len(&self) -> usize {
        self.num_days as usize * self.slots_per_day as usize
    }

    pub(crate) fn contains(&self, day: u32, slot: u32) -> bool {
        day < self.num_days && slot < self.slots_per_day
    }

    pub(crate) fn index(&self, day: u32, slot: u32) -> usize {
        debug_assert!(self.contains(day, slot));
        day as usize * self.slots_per_day as usize + slot as usize
    }

    pub(crate) fn slot_ref(&self, index: usize) -> SlotRef {
        let slots_per_day = self.slots_per_day as usize;
        SlotRef {
            day: (index / slots_per_day) as u32,
            slot: (index % slots_per_day) as u32,
        }
    }

    /// The flat indices of the slots of one day, in order.
    pub(crate) fn day_indices(&self, day: u32) -> std::ops::Range<usize> {
        let start = self.index_unchecked(day, 0);
        start..start + self.slots_per_day as usize
    }

    /// Iterate over every slot in day-major order.
    pub(crate) fn slots(&self) -> impl Iterator<Item = SlotRef> + '_ {
        (0..self.num_days)
            .flat_map(move |day| (0..self.slots_per_day).map(move |slot| SlotRef { day, slot }))
    }

    fn index_unchecked(&self, day: u32, slot: u32) -> usize {
        day as usize * self.slots_per_day as usize + slot as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_day_major() {
        let grid = Grid::new(3, 4);

        assert_eq!(grid.len(), 12);
        assert_eq!(grid.index(1, 2), 6);
        assert_eq!(grid.slot_ref(6), SlotRef { day: 1, slot: 2 });
        assert_eq!(grid.day_indices(2), 8..12);
    }

    #[test]
    fn slots_iterate_in_index_order() {
        let grid = Grid::new(2, 3);

        let indices = grid
            .slots()
            .map(|slot_ref| grid.index(slot_ref.day, slot_ref.slot))
            .collect::<Vec<_>>();

        assert_eq!(indices, (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn empty_grid_has_no_slots() {
        let grid = Grid::new(0, 12);

        assert_eq!(grid.len(), 0);
        assert_eq!(grid.slots().count(), 0);
    }
}
