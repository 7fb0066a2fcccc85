use itertools::Itertools;
#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use serde::Serialize;

use super::feasibility::Severity;
use crate::formatter::ScheduleSolution;

/// A slot whose demand is not served in full.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoverageGap {
    pub day: u32,
    pub slot: u32,
    pub demand: f64,
    pub served: f64,
    /// `served / demand`, below one.
    pub coverage_rate: f64,
    /// `Critical` below 50% coverage, `High` below 80%, `Low` otherwise.
    pub severity: Severity,
}

/// The slots with unmet demand, the worst covered first.
pub(crate) fn coverage_gaps(solution: &ScheduleSolution) -> Vec<CoverageGap> {
    solution
        .unmet_demand
        .iter()
        .filter(|unmet| unmet.demand > 0.0)
        .map(|unmet| {
            let coverage_rate = unmet.served / unmet.demand;
            let severity = if coverage_rate < 0.5 {
                Severity::Critical
            } else if coverage_rate < 0.8 {
                Severity::High
            } else {
                Severity::Low
            };

            CoverageGap {
                day: unmet.day,
                slot: unmet.slot,
                demand: unmet.demand,
                served: unmet.served,
                coverage_rate,
                severity,
            }
        })
        .sorted_by(|left, right| {
            left.coverage_rate
                .total_cmp(&right.coverage_rate)
                .then_with(|| (left.day, left.slot).cmp(&(right.day, right.slot)))
        })
        .collect()
}
