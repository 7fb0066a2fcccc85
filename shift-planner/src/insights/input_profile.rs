//! The pass over the input alone, which runs whether or not a schedule was found.
#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::chain::evaluate;
use crate::domain::RoleId;
use crate::domain::RosterIndex;

/// Tolerance when comparing capacities with requirements.
pub(crate) const RATIO_EPSILON: f64 = 1e-9;

/// How the available staff of a role compares with what the demand requires of it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoleCapacity {
    pub role: RoleId,
    pub producing: bool,
    pub eligible_employees: usize,
    /// `sum min(max_hours, horizon_hours)` over eligible employees.
    pub total_available_hours: f64,
    /// Items produced if every available hour is worked.
    pub potential_output: f64,
    /// The potential output after applying the production chains feeding the role.
    pub chain_capped_output: f64,
    /// Items the role has to produce over the horizon.
    pub role_demand: f64,
    /// Hours the role has to be staffed over the horizon.
    pub required_hours: f64,
    /// Potential output over role demand for producing roles; available over required hours for
    /// roles which only have a minimum presence. `None` when nothing is required of the role.
    pub capacity_ratio: Option<f64>,
    pub is_sufficient: bool,
}

impl RoleCapacity {
    pub fn hours_shortfall(&self) -> f64 {
        (self.required_hours - self.total_available_hours).max(0.0)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct InputProfile {
    pub(crate) capacity: Vec<RoleCapacity>,
    pub(crate) mean_demand: f64,
    /// The number of slots with positive demand.
    pub(crate) open_slots: usize,
    /// The most the roster can serve in one slot with every eligible employee present.
    pub(crate) max_slot_output: f64,
}

impl InputProfile {
    pub(crate) fn collect(roster: &RosterIndex<'_>) -> InputProfile {
        let input = roster.input();
        let horizon_hours = input.horizon_hours();
        let total_demand = roster.total_demand();
        let num_slots = roster.num_slots();
        let open_slots = roster
            .demand_per_slot()
            .iter()
            .filter(|&&demand| demand > 0.0)
            .count();

        let available_hours = (0..roster.num_roles())
            .map(|role| {
                (0..roster.num_employees())
                    .filter(|&employee| roster.is_eligible(employee, role))
                    .map(|employee| {
                        roster
                            .employee(employee)
                            .max_hours_per_week
                            .min(horizon_hours)
                    })
                    .sum::<f64>()
            })
            .collect::<Vec<_>>();

        let potential_output = (0..roster.num_roles())
            .map(|role| {
                let role_data = roster.role(role);
                if role_data.producing {
                    available_hours[role] * role_data.items_per_hour
                } else {
                    0.0
                }
            })
            .collect::<Vec<_>>();
        let chain_capped_output = apply_chains(roster, &potential_output);

        let per_slot_output = (0..roster.num_roles())
            .map(|role| {
                let role_data = roster.role(role);
                if role_data.producing {
                    roster.eligible_count(role) as f64
                        * role_data.items_per_hour
                        * input.slot_len_hour
                } else {
                    0.0
                }
            })
            .collect::<Vec<_>>();
        let max_slot_output = apply_chains(roster, &per_slot_output)
            .iter()
            .enumerate()
            .filter(|&(role, _)| roster.is_terminal(role))
            .map(|(_, output)| output)
            .sum();

        let capacity = (0..roster.num_roles())
            .map(|role| {
                let role_data = roster.role(role);
                let role_demand = roster.requirement_share(role) * total_demand;

                let (required_hours, capacity_ratio) = if role_data.producing {
                    let required_hours = if role_data.items_per_hour > 0.0 {
                        role_demand / role_data.items_per_hour
                    } else {
                        0.0
                    };
                    let ratio = (role_demand > 0.0).then(|| potential_output[role] / role_demand);
                    (required_hours, ratio)
                } else {
                    let required_hours = f64::from(role_data.min_present)
                        * open_slots as f64
                        * input.slot_len_hour;
                    let ratio =
                        (required_hours > 0.0).then(|| available_hours[role] / required_hours);
                    (required_hours, ratio)
                };

                RoleCapacity {
                    role: role_data.id.clone(),
                    producing: role_data.producing,
                    eligible_employees: roster.eligible_count(role),
                    total_available_hours: available_hours[role],
                    potential_output: potential_output[role],
                    chain_capped_output: chain_capped_output[role],
                    role_demand,
                    required_hours,
                    capacity_ratio,
                    is_sufficient: capacity_ratio
                        .map_or(true, |ratio| ratio >= 1.0 - RATIO_EPSILON),
                }
            })
            .collect();

        InputProfile {
            capacity,
            mean_demand: if num_slots == 0 {
                0.0
            } else {
                total_demand / num_slots as f64
            },
            open_slots,
            max_slot_output,
        }
    }
}

/// Cap each role's output by the chains feeding it, upstream roles first.
fn apply_chains(roster: &RosterIndex<'_>, outputs: &[f64]) -> Vec<f64> {
    let mut capped = outputs.to_vec();

    for &role in roster.topological_order() {
        for chain in roster.chains().iter().filter(|chain| chain.downstream == role) {
            let upstream = chain
                .upstream
                .iter()
                .map(|&upstream| capped[upstream])
                .collect::<Vec<_>>();
            if let Some(cap) = evaluate(chain.rule, &upstream) {
                capped[role] = capped[role].min(cap);
            }
        }
    }

    capped
}
