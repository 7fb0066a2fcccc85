#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use serde::Serialize;

/// An employee working one slot in one role, by position in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlotAssignment {
    pub employee: usize,
    pub day: u32,
    pub slot: u32,
    pub role: usize,
}

/// An employee working a shift template on one day, by position in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShiftAssignment {
    pub employee: usize,
    pub day: u32,
    pub shift: usize,
    pub role: usize,
}

/// The values of a solved model, in model units.
///
/// Quantities of items are in units of `1 / units_per_item` items, the objective in minor
/// currency units. Per-slot vectors are indexed by `day * num_slots_per_day + slot`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawSolution {
    pub objective: i64,
    /// The resolution at which the model counted items.
    pub units_per_item: i64,
    /// Ordered by employee, day and slot.
    pub slot_assignments: Vec<SlotAssignment>,
    /// Ordered by employee, day and shift; empty in free-slot mode.
    pub shift_assignments: Vec<ShiftAssignment>,
    /// `production_units[role * num_slots + slot]`; zero for roles which do not produce.
    pub production_units: Vec<i64>,
    /// The output of terminal roles per slot.
    pub served_units: Vec<i64>,
    /// Unmet demand per slot; all zero when demand is hard.
    pub unmet_units: Vec<i64>,
}
