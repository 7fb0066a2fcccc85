//! Conversions between the real-valued input and the integer units of the model.
//!
//! Money is counted in cents. Items are counted at an [`ItemScale`] chosen per roster, so that
//! a capacity which exactly matches a demand in items also matches it in model units.
use crate::domain::Role;
use crate::domain::RosterIndex;
use crate::error::SchedulerError;
use crate::error::SchedulerResult;

/// Model units per unit of currency.
pub(crate) const CURRENCY_UNITS: f64 = 100.0;
/// The denominator used to turn a real scale factor into an integer ratio.
pub(crate) const SCALE_DENOMINATOR: i64 = 1000;

/// The candidate resolutions for items, coarsest first.
const ITEM_RESOLUTIONS: [i64; 3] = [10, 100, 1000];
/// How far a scaled quantity may be from an integer and still count as whole.
const WHOLE_TOLERANCE: f64 = 1e-6;

/// The number of model units per item.
///
/// Throughput per slot and demand are converted with the same rounding, at the coarsest
/// resolution in which all of them are whole. Quantities finer than thousandths of an item are
/// rounded to the nearest thousandth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ItemScale {
    units_per_item: i64,
}

impl ItemScale {
    pub(crate) fn new(units_per_item: i64) -> ItemScale {
        ItemScale {
            units_per_item: units_per_item.max(1),
        }
    }

    pub(crate) fn for_roster(roster: &RosterIndex<'_>) -> ItemScale {
        let slot_len_hour = roster.input().slot_len_hour;
        let quantities = (0..roster.num_roles())
            .map(|role| roster.role(role))
            .filter(|role| role.producing)
            .map(|role| role.items_per_hour * slot_len_hour)
            .chain((0..roster.num_slots()).map(|slot| roster.demand_at(slot)))
            .collect::<Vec<_>>();

        ItemScale::fitting(&quantities)
    }

    fn fitting(quantities: &[f64]) -> ItemScale {
        let units_per_item = ITEM_RESOLUTIONS
            .into_iter()
            .find(|&units| {
                quantities.iter().all(|&quantity| {
                    let scaled = quantity * units as f64;
                    (scaled - scaled.round()).abs() <= WHOLE_TOLERANCE
                })
            })
            .unwrap_or(ITEM_RESOLUTIONS[ITEM_RESOLUTIONS.len() - 1]);

        ItemScale::new(units_per_item)
    }

    pub(crate) fn units_per_item(self) -> i64 {
        self.units_per_item
    }

    /// The number of item units one staff member of the role produces in one slot.
    pub(crate) fn throughput(self, role: &Role, slot_len_hour: f64) -> i64 {
        if !role.producing {
            return 0;
        }
        self.to_units(role.items_per_hour * slot_len_hour)
    }

    pub(crate) fn demand(self, quantity: f64) -> i64 {
        self.to_units(quantity)
    }

    pub(crate) fn items(self, units: i64) -> f64 {
        units as f64 / self.units_per_item as f64
    }

    /// The objective cost of one unit of unmet demand, in cents.
    ///
    /// A positive penalty costs at least one cent per unit, so it never drops out of the
    /// objective.
    pub(crate) fn unmet_penalty(self, penalty_per_item: f64) -> i64 {
        let per_unit = to_minor_currency(penalty_per_item / self.units_per_item as f64);
        if penalty_per_item > 0.0 {
            per_unit.max(1)
        } else {
            per_unit
        }
    }

    fn to_units(self, quantity: f64) -> i64 {
        (quantity * self.units_per_item as f64).round() as i64
    }
}

pub(crate) fn to_minor_currency(amount: f64) -> i64 {
    (amount * CURRENCY_UNITS).round() as i64
}

pub(crate) fn from_minor_currency(amount: i64) -> f64 {
    amount as f64 / CURRENCY_UNITS
}

/// Narrow a model quantity to the integer type of the solver.
pub(crate) fn to_solver_int(quantity: &'static str, value: i64) -> SchedulerResult<i32> {
    i32::try_from(value).map_err(|_| SchedulerError::NumericOverflow { quantity, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_coarsest_whole_resolution_is_chosen() {
        assert_eq!(ItemScale::fitting(&[10.0, 2.5, 0.0]).units_per_item(), 10);
        assert_eq!(ItemScale::fitting(&[7.25, 0.75]).units_per_item(), 100);
        assert_eq!(ItemScale::fitting(&[0.125]).units_per_item(), 1000);
        assert_eq!(ItemScale::fitting(&[1.0 / 3.0]).units_per_item(), 1000);
    }

    #[test]
    fn throughput_and_demand_share_one_rounding() {
        let scale = ItemScale::fitting(&[3.0 * 0.25, 0.75]);
        let role = Role::producing("kitchen", 3.0);

        assert_eq!(scale.throughput(&role, 0.25), scale.demand(0.75));
        assert_eq!(scale.throughput(&Role::support("host"), 1.0), 0);

        let scale = ItemScale::fitting(&[7.25]);
        let role = Role::producing("kitchen", 7.25);
        assert_eq!(scale.throughput(&role, 1.0), 725);
        assert_eq!(scale.demand(7.25), 725);
    }

    #[test]
    fn units_convert_back_to_items() {
        let scale = ItemScale::new(10);

        assert_eq!(scale.demand(2.34), 23);
        assert_eq!(scale.demand(2.36), 24);
        assert_eq!(scale.items(24), 2.4);
    }

    #[test]
    fn small_unmet_penalties_stay_in_the_objective() {
        assert_eq!(ItemScale::new(10).unmet_penalty(50.0), 500);
        assert_eq!(ItemScale::new(1000).unmet_penalty(50.0), 5);
        assert_eq!(ItemScale::new(10).unmet_penalty(0.001), 1);
        assert_eq!(ItemScale::new(10).unmet_penalty(0.0), 0);
    }

    #[test]
    fn overflowing_values_are_reported() {
        assert_eq!(to_solver_int("objective", 12).ok(), Some(12));
        assert!(matches!(
            to_solver_int("objective", i64::from(i32::MAX) + 1),
            Err(SchedulerError::NumericOverflow {
                quantity: "objective",
                ..
            })
        ));
    }
}
