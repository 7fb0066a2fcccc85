use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::ConstructionError;

/// The forecast quantity of items needed per `(day, slot)`.
///
/// A valid demand covers every slot of the planning grid exactly once; see
/// [`SchedulerInput::validate`](super::SchedulerInput::validate).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<DemandEntry>", into = "Vec<DemandEntry>")
)]
pub struct Demand {
    quantities: BTreeMap<(u32, u32), f64>,
}

/// The serialised form of one demand entry.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DemandEntry {
    pub day: u32,
    pub slot: u32,
    pub quantity: f64,
}

impl Demand {
    /// The same quantity in every slot of a `num_days` by `slots_per_day` grid.
    pub fn uniform(num_days: u32, slots_per_day: u32, quantity: f64) -> Demand {
        Demand::from_fn(num_days, slots_per_day, |_, _| quantity)
    }

    /// A demand over the full grid with the quantity of each slot given by `quantity`.
    pub fn from_fn(
        num_days: u32,
        slots_per_day: u32,
        mut quantity: impl FnMut(u32, u32) -> f64,
    ) -> Demand {
        let mut demand = Demand::default();
        for day in 0..num_days {
            for slot in 0..slots_per_day {
                demand.insert(day, slot, quantity(day, slot));
            }
        }
        demand
    }

    pub fn insert(&mut self, day: u32, slot: u32, quantity: f64) {
        let _ = self.quantities.insert((day, slot), quantity);
    }

    pub fn get(&self, day: u32, slot: u32) -> Option<f64> {
        self.quantities.get(&(day, slot)).copied()
    }

    /// Iterate over the entries ordered by day, then slot.
    pub fn iter(&self) -> impl Iterator<Item = DemandEntry> + '_ {
        self.quantities
            .iter()
            .map(|(&(day, slot), &quantity)| DemandEntry {
                day,
                slot,
                quantity,
            })
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.quantities.values().sum()
    }
}

/// Later entries for the same slot replace earlier ones.
impl FromIterator<DemandEntry> for Demand {
    fn from_iter<T: IntoIterator<Item = DemandEntry>>(iter: T) -> Self {
        let mut demand = Demand::default();
        for entry in iter {
            demand.insert(entry.day, entry.slot, entry.quantity);
        }
        demand
    }
}

impl TryFrom<Vec<DemandEntry>> for Demand {
    type Error = ConstructionError;

    fn try_from(entries: Vec<DemandEntry>) -> Result<Self, Self::Error> {
        let mut demand = Demand::default();
        for entry in entries {
            if demand
                .quantities
                .insert((entry.day, entry.slot), entry.quantity)
                .is_some()
            {
                return Err(ConstructionError::DuplicateDemand {
                    day: entry.day,
                    slot: entry.slot,
                });
            }
        }
        Ok(demand)
    }
}

impl From<Demand> for Vec<DemandEntry> {
    fn from(demand: Demand) -> Self {
        demand.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_demand_covers_the_grid() {
        let demand = Demand::uniform(2, 3, 4.0);

        assert_eq!(demand.len(), 6);
        assert_eq!(demand.get(1, 2), Some(4.0));
        assert_eq!(demand.get(2, 0), None);
        assert_eq!(demand.total(), 24.0);
    }

    #[test]
    fn entries_are_ordered_by_day_then_slot() {
        let demand = Demand::try_from(vec![
            DemandEntry {
                day: 1,
                slot: 0,
                quantity: 1.0,
            },
            DemandEntry {
                day: 0,
                slot: 1,
                quantity: 2.0,
            },
        ])
        .expect("every slot is given once");

        let order = demand
            .iter()
            .map(|entry| (entry.day, entry.slot))
            .collect::<Vec<_>>();

        assert_eq!(order, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn repeated_slots_are_rejected() {
        let entry = DemandEntry {
            day: 0,
            slot: 2,
            quantity: 1.0,
        };

        assert_eq!(
            Demand::try_from(vec![entry, DemandEntry { quantity: 3.0, ..entry }]),
            Err(ConstructionError::DuplicateDemand { day: 0, slot: 2 })
        );
    }
}
