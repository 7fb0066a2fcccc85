#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use serde::Serialize;

use super::solution_profile::SolutionProfile;
use crate::domain::RoleId;
use crate::domain::RosterIndex;
use crate::options::InsightOptions;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CostAnalysis {
    pub total_wage_cost: f64,
    /// Revenue lost on unmet demand.
    pub opportunity_cost_unmet_demand: f64,
    pub total_cost: f64,
    /// `None` when nothing was served.
    pub cost_per_item_served: Option<f64>,
    pub cost_by_role: Vec<RoleCost>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoleCost {
    pub role: RoleId,
    pub hours: f64,
    pub wage_cost: f64,
}

pub(crate) fn analyse_cost(
    roster: &RosterIndex<'_>,
    profile: &SolutionProfile<'_>,
    options: &InsightOptions,
) -> CostAnalysis {
    let totals = &profile.solution.totals;
    let opportunity_cost_unmet_demand = totals.total_unmet * options.revenue_per_item;

    CostAnalysis {
        total_wage_cost: totals.total_wage_cost,
        opportunity_cost_unmet_demand,
        total_cost: totals.total_wage_cost + opportunity_cost_unmet_demand,
        cost_per_item_served: (totals.total_served > 0.0)
            .then(|| totals.total_wage_cost / totals.total_served),
        cost_by_role: (0..roster.num_roles())
            .map(|role| RoleCost {
                role: roster.role(role).id.clone(),
                hours: profile.role_hours[role],
                wage_cost: profile.role_wage_cost[role],
            })
            .collect(),
    }
}
