#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use serde::Serialize;

use super::Demand;
use super::Employee;
use super::ProductionChain;
use super::Role;
use super::RosterIndex;
use super::Shift;
use crate::error::ConstructionError;

/// Everything needed to plan one venue over one horizon.
///
/// The input is read-only once constructed; each solve builds its own solver state from it, so
/// the same input can be solved concurrently from several threads.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SchedulerInput {
    pub employees: Vec<Employee>,
    pub roles: Vec<Role>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub chains: Vec<ProductionChain>,
    /// Daily shift templates, only used when `fixed_shifts` is set.
    #[cfg_attr(feature = "serde", serde(default))]
    pub shifts: Vec<Shift>,
    pub num_days: u32,
    pub num_slots_per_day: u32,
    pub slot_len_hour: f64,
    /// The number of idle slots required after a block of work ends, within the same day.
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_rest_slots: u32,
    /// The minimum number of consecutive slots in a block of work.
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_shift_length_slots: u32,
    pub demand: Demand,
    /// Assign employees to whole shift templates instead of individual slots.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fixed_shifts: bool,
    /// Treat demand as a hard constraint instead of penalising unmet demand.
    #[cfg_attr(feature = "serde", serde(default))]
    pub meet_all_demand: bool,
}

impl SchedulerInput {
    /// An input over `num_days` days of `num_slots_per_day` slots, without staff or demand.
    pub fn new(num_days: u32, num_slots_per_day: u32, slot_len_hour: f64) -> SchedulerInput {
        SchedulerInput {
            employees: Vec::new(),
            roles: Vec::new(),
            chains: Vec::new(),
            shifts: Vec::new(),
            num_days,
            num_slots_per_day,
            slot_len_hour,
            min_rest_slots: 0,
            min_shift_length_slots: 0,
            demand: Demand::default(),
            fixed_shifts: false,
            meet_all_demand: false,
        }
    }

    pub fn with_employees(mut self, employees: impl IntoIterator<Item = Employee>) -> Self {
        self.employees.extend(employees);
        self
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles.extend(roles);
        self
    }

    pub fn with_chain(mut self, chain: ProductionChain) -> Self {
        self.chains.push(chain);
        self
    }

    /// Switch to fixed-shift mode with the given daily templates.
    pub fn with_shift_templates(mut self, shifts: impl IntoIterator<Item = Shift>) -> Self {
        self.shifts.extend(shifts);
        self.fixed_shifts = true;
        self
    }

    pub fn with_demand(mut self, demand: Demand) -> Self {
        self.demand = demand;
        self
    }

    /// Fill the grid with the same demand in every slot.
    pub fn with_uniform_demand(self, quantity: f64) -> Self {
        let demand = Demand::uniform(self.num_days, self.num_slots_per_day, quantity);
        self.with_demand(demand)
    }

    pub fn with_min_rest_slots(mut self, min_rest_slots: u32) -> Self {
        self.min_rest_slots = min_rest_slots;
        self
    }

    pub fn with_min_shift_length_slots(mut self, min_shift_length_slots: u32) -> Self {
        self.min_shift_length_slots = min_shift_length_slots;
        self
    }

    pub fn with_meet_all_demand(mut self, meet_all_demand: bool) -> Self {
        self.meet_all_demand = meet_all_demand;
        self
    }

    /// The length of the planning horizon in hours.
    pub fn horizon_hours(&self) -> f64 {
        f64::from(self.num_days) * f64::from(self.num_slots_per_day) * self.slot_len_hour
    }

    /// Check the input and resolve its cross references.
    ///
    /// Fails on the first malformed entry found; nothing is defaulted or repaired.
    pub fn validate(&self) -> Result<RosterIndex<'_>, ConstructionError> {
        RosterIndex::build(self)
    }
}
