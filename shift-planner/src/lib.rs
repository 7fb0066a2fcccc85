//! # Shift planner
//! A workforce shift scheduler built on the [Pumpkin](pumpkin_solver) constraint solver.
//!
//! Given employees, roles, production chains between roles and a demand forecast over a grid of
//! days and slots, the planner assigns employees to roles in slots (or to whole shift templates)
//! such that every labour rule holds and the wage cost plus the penalties for unmet demand and for
//! deviating from preferred hours is minimal.
//!
//! Every call also produces an [`InsightsReport`]. When no schedule exists the report explains the
//! likely causes; when one does it describes how the schedule uses the staff.
//!
//! # Solving a schedule
//! ```rust
//! # use shift_planner::domain::Employee;
//! # use shift_planner::domain::Role;
//! # use shift_planner::domain::SchedulerInput;
//! # use shift_planner::solve_schedule;
//! let input = SchedulerInput::new(1, 4, 1.0)
//!     .with_roles([Role::producing("barista", 10.0)])
//!     .with_employees([Employee::new("ana", 18.0, 8.0).eligible_for("barista")])
//!     .with_uniform_demand(10.0)
//!     .with_meet_all_demand(true);
//!
//! let (solution, description, insights) = solve_schedule(&input, 10.0)
//!     .expect("the input is well-formed")
//!     .into_parts();
//!
//! let solution = solution.expect("ana can cover every slot");
//! assert_eq!(solution.totals.total_hours, 4.0);
//! assert!(description.starts_with("Status: OPTIMAL"));
//! assert!(insights.feasibility_analysis.is_none());
//! ```
//!
//! # Production chains
//! A [`ProductionChain`](domain::ProductionChain) caps the output of a downstream role by the
//! output of its upstream roles. How the upstream outputs combine is decided by a
//! [`ChainRule`](chain::ChainRule); custom rules implement
//! [`ContributionRule`](chain::ContributionRule).
pub mod chain;
pub mod domain;
pub mod driver;
pub mod error;
pub mod formatter;
mod grid;
pub mod insights;
pub(crate) mod model;
pub mod options;

use std::time::Duration;

pub use grid::SlotRef;
use log::info;

use crate::domain::SchedulerInput;
use crate::driver::SolveDiagnostics;
use crate::driver::SolvePhase;
use crate::driver::SolveStatus;
pub use crate::error::ConstructionError;
pub use crate::error::SchedulerError;
pub use crate::error::SchedulerResult;
use crate::formatter::ScheduleSolution;
pub use crate::insights::InsightsReport;
use crate::options::SchedulerOptions;

/// Everything a call to [`solve_schedule`] produces.
#[derive(Debug, Clone)]
pub struct ScheduleOutcome {
    /// Present exactly when `status` is `OPTIMAL` or `FEASIBLE`.
    pub solution: Option<ScheduleSolution>,
    /// The summary of the solution, or why there is none.
    pub description: String,
    pub insights: InsightsReport,
    pub status: SolveStatus,
    pub diagnostics: SolveDiagnostics,
}

impl ScheduleOutcome {
    pub fn into_parts(self) -> (Option<ScheduleSolution>, String, InsightsReport) {
        (self.solution, self.description, self.insights)
    }
}

/// Solve `input` with the default options, searching for at most `time_limit_seconds`.
///
/// An infeasible roster or a search that runs out of time is not an error: the outcome then has
/// no solution, and its insights contain a feasibility analysis. Errors are returned only for
/// malformed input, an invalid time limit and quantities that overflow the solver's integers.
pub fn solve_schedule(
    input: &SchedulerInput,
    time_limit_seconds: f64,
) -> SchedulerResult<ScheduleOutcome> {
    solve_schedule_with_options(input, time_limit_seconds, &SchedulerOptions::default())
}

pub fn solve_schedule_with_options(
    input: &SchedulerInput,
    time_limit_seconds: f64,
    options: &SchedulerOptions,
) -> SchedulerResult<ScheduleOutcome> {
    let time_limit = Duration::try_from_secs_f64(time_limit_seconds)
        .map_err(|_| SchedulerError::InvalidTimeLimit(time_limit_seconds))?;
    options.validate()?;
    let roster = input.validate()?;

    let outcome = driver::solve_validated(&roster, time_limit, options)?;
    let status = outcome.status;
    let mut phase = outcome.phase;

    let solution = outcome
        .raw
        .as_ref()
        .map(|raw| formatter::format_solution(input, raw, status));
    let description = match &solution {
        Some(solution) => solution.summary(),
        None => formatter::describe_failure(status, &outcome.diagnostics, time_limit),
    };
    phase.advance(SolvePhase::concluded(status))?;

    let insights =
        insights::generate_with_roster(&roster, status, solution.as_ref(), &options.insights);
    info!("Scheduling finished in phase {phase}");

    Ok(ScheduleOutcome {
        solution,
        description,
        insights,
        status,
        diagnostics: outcome.diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_time_limits_are_rejected() {
        let input = SchedulerInput::new(1, 1, 1.0).with_uniform_demand(0.0);

        for limit in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                solve_schedule(&input, limit),
                Err(SchedulerError::InvalidTimeLimit(_))
            ));
        }
    }

    #[test]
    fn malformed_input_is_rejected_before_solving() {
        let input = SchedulerInput::new(1, 1, 0.0);

        assert!(matches!(
            solve_schedule(&input, 1.0),
            Err(SchedulerError::Construction(
                ConstructionError::InvalidSlotLength(_)
            ))
        ));
    }
}
