#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use serde::Serialize;

/// A daily shift template; in fixed-shift mode employees are assigned to whole shifts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Shift {
    pub id: String,
    pub start_slot: u32,
    pub length_slots: u32,
}

impl Shift {
    pub fn new(id: impl Into<String>, start_slot: u32, length_slots: u32) -> Shift {
        Shift {
            id: id.into(),
            start_slot,
            length_slots,
        }
    }

    /// The first slot after the shift.
    pub fn end_slot(&self) -> u32 {
        self.start_slot.saturating_add(self.length_slots)
    }

    pub fn covers(&self, slot: u32) -> bool {
        self.start_slot <= slot && slot < self.end_slot()
    }
}
