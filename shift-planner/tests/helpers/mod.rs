//! Rosters shared by the integration tests.
#![allow(
    dead_code,
    reason = "is used in integration tests but unable to find a way to silence these warnings"
)]

use std::collections::BTreeMap;

use shift_planner::domain::Employee;
use shift_planner::domain::Role;
use shift_planner::domain::SchedulerInput;
use shift_planner::formatter::Placement;
use shift_planner::formatter::ScheduleSolution;

pub(crate) const TIME_LIMIT_SECONDS: f64 = 10.0;

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// `count` employees eligible for every role in `roles`, named `{prefix}0`, `{prefix}1`, ...
pub(crate) fn staff(prefix: &str, count: usize, roles: &[&str], max_hours: f64) -> Vec<Employee> {
    (0..count)
        .map(|index| {
            roles.iter().fold(
                Employee::new(format!("{prefix}{index}"), 15.0 + index as f64, max_hours),
                |employee, &role| employee.eligible_for(role),
            )
        })
        .collect()
}

/// One producing role over a single day.
pub(crate) fn single_role_day(
    slots: u32,
    items_per_hour: f64,
    employees: Vec<Employee>,
    demand: f64,
) -> SchedulerInput {
    SchedulerInput::new(1, slots, 1.0)
        .with_roles([Role::producing("crew", items_per_hour)])
        .with_employees(employees)
        .with_uniform_demand(demand)
}

/// The slots every employee works, per day, in slot mode.
pub(crate) fn working_slots(solution: &ScheduleSolution) -> BTreeMap<(String, u32), Vec<u32>> {
    let mut slots = BTreeMap::<(String, u32), Vec<u32>>::new();
    for entry in &solution.schedule {
        if let Placement::Slot { slot } = entry.placement {
            slots
                .entry((entry.employee_id.clone(), entry.day))
                .or_default()
                .push(slot);
        }
    }
    for day_slots in slots.values_mut() {
        day_slots.sort_unstable();
    }
    slots
}

/// The lengths of the runs of consecutive slots in a sorted list.
pub(crate) fn runs(slots: &[u32]) -> Vec<u32> {
    let mut runs = Vec::new();
    let mut previous: Option<u32> = None;
    for &slot in slots {
        match (previous, runs.last_mut()) {
            (Some(last), Some(run)) if last + 1 == slot => *run += 1,
            _ => runs.push(1),
        }
        previous = Some(slot);
    }
    runs
}

/// The number of staff working `role` in every `(day, slot)`.
pub(crate) fn headcount(solution: &ScheduleSolution, role: &str) -> BTreeMap<(u32, u32), usize> {
    let mut counts = BTreeMap::new();
    for entry in solution
        .schedule
        .iter()
        .filter(|entry| entry.role.as_str() == role)
    {
        if let Placement::Slot { slot } = entry.placement {
            *counts.entry((entry.day, slot)).or_insert(0) += 1;
        }
    }
    counts
}
