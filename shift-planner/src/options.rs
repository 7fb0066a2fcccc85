//! Options which tune a scheduling run without changing its hard constraints.
#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::SchedulerError;
use crate::error::SchedulerResult;

/// Options for a call to [`solve_schedule_with_options`](crate::solve_schedule_with_options).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SchedulerOptions {
    /// The weights of the soft terms in the objective.
    pub weights: ObjectiveWeights,
    /// Assumptions used when deriving management insights.
    pub insights: InsightOptions,
    /// The search strategy handed to the solver.
    pub search: SearchStrategy,
}

impl SchedulerOptions {
    pub(crate) fn validate(&self) -> SchedulerResult<()> {
        check_non_negative("unmet_demand_penalty", self.weights.unmet_demand_penalty)?;
        check_non_negative("preference_penalty", self.weights.preference_penalty)?;
        check_non_negative("revenue_per_item", self.insights.revenue_per_item)?;
        check_non_negative("peak_threshold", self.insights.peak_threshold)?;
        check_non_negative("hire_weekly_hours", self.insights.hire_weekly_hours)?;
        Ok(())
    }
}

/// Weights of the objective terms, expressed in the same currency as employee wages.
///
/// The wage term always has weight one; these weights price the soft terms relative to it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ObjectiveWeights {
    /// Cost of every demanded item that is not served.
    ///
    /// The model charges it in whole cents per unit of demand, where a unit is a tenth, a
    /// hundredth or a thousandth of an item. A positive penalty costs at least one cent per unit.
    pub unmet_demand_penalty: f64,
    /// Cost per hour of deviation between an employee's worked and preferred hours.
    ///
    /// Only employees who work at least one slot incur this cost.
    pub preference_penalty: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        ObjectiveWeights {
            unmet_demand_penalty: 50.0,
            preference_penalty: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct InsightOptions {
    /// Revenue assumed for every served item; prices the opportunity cost of unmet demand.
    pub revenue_per_item: f64,
    /// A slot is a peak when its demand exceeds the mean demand by this fraction.
    pub peak_threshold: f64,
    /// The maximum number of peak periods reported.
    pub max_peak_periods: usize,
    /// Weekly hours assumed for one new hire when sizing hiring recommendations.
    pub hire_weekly_hours: f64,
}

impl Default for InsightOptions {
    fn default() -> Self {
        InsightOptions {
            revenue_per_item: 15.0,
            peak_threshold: 0.2,
            max_peak_periods: 10,
            hire_weekly_hours: 40.0,
        }
    }
}

/// Determines how the solver explores assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SearchStrategy {
    /// The solver's default activity-based search.
    #[default]
    Default,
    /// Branch over the model variables in creation order, trying the smallest value first.
    ///
    /// The first schedule found staffs nobody beyond what the hard constraints force, and on
    /// larger rosters the time budget may run out long before it is improved.
    ZeroFirst,
}

fn check_non_negative(name: &'static str, value: f64) -> SchedulerResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SchedulerError::InvalidOption { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_valid() {
        assert!(SchedulerOptions::default().validate().is_ok());
    }

    #[test]
    fn negative_penalty_is_rejected() {
        let options = SchedulerOptions {
            weights: ObjectiveWeights {
                unmet_demand_penalty: -1.0,
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(matches!(
            options.validate(),
            Err(SchedulerError::InvalidOption {
                name: "unmet_demand_penalty",
                ..
            })
        ));
    }

    #[test]
    fn the_default_search_is_the_solver_default() {
        assert_eq!(SchedulerOptions::default().search, SearchStrategy::Default);
    }

    #[test]
    fn nan_threshold_is_rejected() {
        let options = SchedulerOptions {
            insights: InsightOptions {
                peak_threshold: f64::NAN,
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(options.validate().is_err());
    }
}
