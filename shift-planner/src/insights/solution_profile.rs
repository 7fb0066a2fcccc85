//! The pass over a solved schedule.
use super::input_profile::InputProfile;
use crate::domain::RosterIndex;
use crate::formatter::ScheduleSolution;

/// Hours worked per employee and role, aligned with the roster.
#[derive(Debug, Clone)]
pub(crate) struct SolutionProfile<'s> {
    pub(crate) solution: &'s ScheduleSolution,
    /// Hours worked by every employee, in input order.
    pub(crate) employee_hours: Vec<f64>,
    /// Hours worked in every role, in input order.
    pub(crate) role_hours: Vec<f64>,
    pub(crate) role_wage_cost: Vec<f64>,
    /// The number of employees who work a role at least once.
    pub(crate) role_workers: Vec<usize>,
    /// Available hours of every role, copied from the input pass.
    pub(crate) role_available_hours: Vec<f64>,
}

impl<'s> SolutionProfile<'s> {
    pub(crate) fn collect(
        roster: &RosterIndex<'_>,
        input_profile: &InputProfile,
        solution: &'s ScheduleSolution,
    ) -> SolutionProfile<'s> {
        let num_roles = roster.num_roles();
        let mut employee_hours = vec![0.0; roster.num_employees()];
        let mut role_hours = vec![0.0; num_roles];
        let mut role_wage_cost = vec![0.0; num_roles];
        let mut role_workers = vec![0; num_roles];

        for (employee, stats) in solution
            .employee_stats
            .iter()
            .enumerate()
            .take(roster.num_employees())
        {
            employee_hours[employee] = stats.work_hours;
            let wage = roster.employee(employee).wage;

            for (role_id, &hours) in &stats.hours_by_role {
                let Some(role) = roster.role_position(role_id) else {
                    continue;
                };
                role_hours[role] += hours;
                role_wage_cost[role] += hours * wage;
                if hours > 0.0 {
                    role_workers[role] += 1;
                }
            }
        }

        SolutionProfile {
            solution,
            employee_hours,
            role_hours,
            role_wage_cost,
            role_workers,
            role_available_hours: input_profile
                .capacity
                .iter()
                .map(|capacity| capacity.total_available_hours)
                .collect(),
        }
    }
}
