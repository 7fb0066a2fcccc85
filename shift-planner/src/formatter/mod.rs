//! Turns a [`RawSolution`] into the caller-facing [`ScheduleSolution`].
mod summary;

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use serde::Serialize;
pub use summary::describe_failure;

use crate::domain::RoleId;
use crate::domain::SchedulerInput;
use crate::driver::RawSolution;
use crate::driver::SolveStatus;
use crate::model::units::from_minor_currency;
use crate::model::units::ItemScale;

/// A solved schedule.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleSolution {
    pub status: SolveStatus,
    /// The objective in currency units, including the soft penalties.
    pub objective_value: f64,
    /// Ordered by employee, then day, then slot.
    pub schedule: Vec<ScheduleEntry>,
    /// One entry per employee, in input order, including employees who do not work.
    pub employee_stats: Vec<EmployeeStats>,
    /// The slots in which demand is not served in full.
    pub unmet_demand: Vec<UnmetDemand>,
    pub totals: ScheduleTotals,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleEntry {
    pub employee_id: String,
    pub day: u32,
    pub placement: Placement,
    pub role: RoleId,
}

/// When an entry of the schedule takes place within its day.
#[allow(
    variant_size_differences,
    reason = "entries are built once per solve and never stored in bulk"
)]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Placement {
    Slot {
        slot: u32,
    },
    /// A whole shift template covering `start_slot..end_slot`.
    Shift {
        shift_id: String,
        start_slot: u32,
        end_slot: u32,
    },
}

impl Placement {
    pub fn start_slot(&self) -> u32 {
        match self {
            Placement::Slot { slot } => *slot,
            Placement::Shift { start_slot, .. } => *start_slot,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EmployeeStats {
    pub employee_id: String,
    pub work_slots: u32,
    pub work_hours: f64,
    pub hours_by_role: BTreeMap<RoleId, f64>,
    pub wage_cost: f64,
    /// The longest run of consecutive working slots within one day.
    pub longest_run_slots: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnmetDemand {
    pub day: u32,
    pub slot: u32,
    pub demand: f64,
    pub served: f64,
    pub unmet: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleTotals {
    pub employees_scheduled: usize,
    pub total_hours: f64,
    pub total_wage_cost: f64,
    pub total_demand: f64,
    /// Served items, counting no more than the demand of each slot.
    pub total_served: f64,
    pub total_unmet: f64,
}

impl ScheduleSolution {
    pub fn stats_for(&self, employee_id: &str) -> Option<&EmployeeStats> {
        self.employee_stats
            .iter()
            .find(|stats| stats.employee_id == employee_id)
    }
}

/// Build the caller-facing schedule for a solved input.
///
/// `raw` must come from solving `input`.
pub fn format_solution(
    input: &SchedulerInput,
    raw: &RawSolution,
    status: SolveStatus,
) -> ScheduleSolution {
    let slots_per_day = input.num_slots_per_day as usize;
    let num_slots = input.num_days as usize * slots_per_day;

    // working[employee][slot] holds the role worked, if any.
    let mut working = vec![vec![None; num_slots]; input.employees.len()];
    for assignment in &raw.slot_assignments {
        let index = assignment.day as usize * slots_per_day + assignment.slot as usize;
        working[assignment.employee][index] = Some(assignment.role);
    }

    let schedule = if input.fixed_shifts {
        raw.shift_assignments
            .iter()
            .map(|assignment| {
                let shift = &input.shifts[assignment.shift];
                ScheduleEntry {
                    employee_id: input.employees[assignment.employee].id.clone(),
                    day: assignment.day,
                    placement: Placement::Shift {
                        shift_id: shift.id.clone(),
                        start_slot: shift.start_slot,
                        end_slot: shift.end_slot(),
                    },
                    role: input.roles[assignment.role].id.clone(),
                }
            })
            .collect()
    } else {
        raw.slot_assignments
            .iter()
            .map(|assignment| ScheduleEntry {
                employee_id: input.employees[assignment.employee].id.clone(),
                day: assignment.day,
                placement: Placement::Slot {
                    slot: assignment.slot,
                },
                role: input.roles[assignment.role].id.clone(),
            })
            .collect::<Vec<_>>()
    };

    let employee_stats = input
        .employees
        .iter()
        .zip(&working)
        .map(|(employee, slots)| {
            let mut hours_by_role = BTreeMap::new();
            for &role in slots.iter().flatten() {
                *hours_by_role
                    .entry(input.roles[role].id.clone())
                    .or_insert(0.0) += input.slot_len_hour;
            }

            let work_slots = slots.iter().filter(|role| role.is_some()).count() as u32;
            let work_hours = f64::from(work_slots) * input.slot_len_hour;
            let longest_run_slots = if slots_per_day == 0 {
                0
            } else {
                slots
                    .chunks(slots_per_day)
                    .map(longest_run)
                    .max()
                    .unwrap_or(0)
            };

            EmployeeStats {
                employee_id: employee.id.clone(),
                work_slots,
                work_hours,
                hours_by_role,
                wage_cost: work_hours * employee.wage,
                longest_run_slots,
            }
        })
        .collect::<Vec<_>>();

    let scale = ItemScale::new(raw.units_per_item);
    let mut unmet_demand = Vec::new();
    let mut total_demand = 0.0;
    let mut total_served = 0.0;
    for entry in input.demand.iter() {
        let index = entry.day as usize * slots_per_day + entry.slot as usize;
        let produced = raw.served_units.get(index).copied().unwrap_or(0);
        // Demand is met in whole model units.
        let served = if produced >= scale.demand(entry.quantity) {
            entry.quantity
        } else {
            scale.items(produced).min(entry.quantity)
        };
        total_demand += entry.quantity;
        total_served += served;

        if served < entry.quantity {
            unmet_demand.push(UnmetDemand {
                day: entry.day,
                slot: entry.slot,
                demand: entry.quantity,
                served,
                unmet: entry.quantity - served,
            });
        }
    }

    let totals = ScheduleTotals {
        employees_scheduled: employee_stats
            .iter()
            .filter(|stats| stats.work_slots > 0)
            .count(),
        total_hours: employee_stats.iter().map(|stats| stats.work_hours).sum(),
        total_wage_cost: employee_stats.iter().map(|stats| stats.wage_cost).sum(),
        total_demand,
        total_served,
        total_unmet: total_demand - total_served,
    };

    ScheduleSolution {
        status,
        objective_value: from_minor_currency(raw.objective),
        schedule,
        employee_stats,
        unmet_demand,
        totals,
    }
}

fn longest_run(slots: &[Option<usize>]) -> u32 {
    slots
        .iter()
        .fold((0, 0), |(longest, current), role| {
            let current = if role.is_some() { current + 1 } else { 0 };
            (longest.max(current), current)
        })
        .0
}
