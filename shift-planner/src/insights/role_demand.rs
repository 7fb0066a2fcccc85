#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use serde::Serialize;

use super::input_profile::InputProfile;
use super::solution_profile::SolutionProfile;
use crate::domain::RoleId;
use crate::domain::RosterIndex;

/// How a role was used by the schedule.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoleDemand {
    pub role: RoleId,
    pub eligible_employees: usize,
    pub working_employees: usize,
    pub total_hours: f64,
    pub available_hours: f64,
    /// Worked over available hours; zero when no hours are available.
    pub capacity_utilization: f64,
    /// Items the scheduled hours can produce, before the production chains.
    pub staffed_output: f64,
    pub role_demand: f64,
    /// Set on the producing role whose staffed output covers the smallest share of its demand.
    pub is_bottleneck: bool,
}

pub(crate) fn role_demand(
    roster: &RosterIndex<'_>,
    input_profile: &InputProfile,
    profile: &SolutionProfile<'_>,
) -> Vec<RoleDemand> {
    let mut roles = input_profile
        .capacity
        .iter()
        .enumerate()
        .map(|(role, capacity)| {
            let role_data = roster.role(role);
            let total_hours = profile.role_hours[role];
            let available_hours = profile.role_available_hours[role];

            RoleDemand {
                role: capacity.role.clone(),
                eligible_employees: capacity.eligible_employees,
                working_employees: profile.role_workers[role],
                total_hours,
                available_hours,
                capacity_utilization: if available_hours > 0.0 {
                    total_hours / available_hours
                } else {
                    0.0
                },
                staffed_output: if role_data.producing {
                    total_hours * role_data.items_per_hour
                } else {
                    0.0
                },
                role_demand: capacity.role_demand,
                is_bottleneck: false,
            }
        })
        .collect::<Vec<_>>();

    let bottleneck = roles
        .iter()
        .enumerate()
        .filter(|&(role, demand)| roster.role(role).producing && demand.role_demand > 0.0)
        .min_by(|(_, left), (_, right)| {
            let left = left.staffed_output / left.role_demand;
            let right = right.staffed_output / right.role_demand;
            left.total_cmp(&right)
        })
        .map(|(role, _)| role);
    if let Some(role) = bottleneck {
        roles[role].is_bottleneck = true;
    }

    roles
}
