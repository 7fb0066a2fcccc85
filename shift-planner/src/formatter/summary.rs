use std::fmt::Write;
use std::time::Duration;

use super::ScheduleSolution;
use crate::driver::SolveDiagnostics;
use crate::driver::SolveStatus;

impl ScheduleSolution {
    /// A human-readable report of the status, the objective and headline statistics.
    pub fn summary(&self) -> String {
        let totals = &self.totals;
        let mut summary = String::new();

        let _ = writeln!(summary, "Status: {}", self.status);
        let _ = writeln!(summary, "Objective value: {:.2}", self.objective_value);
        let _ = writeln!(
            summary,
            "Employees scheduled: {} of {}",
            totals.employees_scheduled,
            self.employee_stats.len()
        );
        let _ = writeln!(summary, "Total hours: {:.1}", totals.total_hours);
        let _ = writeln!(summary, "Wage cost: {:.2}", totals.total_wage_cost);

        if totals.total_demand > 0.0 {
            let _ = writeln!(
                summary,
                "Demand served: {:.1} of {:.1} items ({:.1}%)",
                totals.total_served,
                totals.total_demand,
                100.0 * totals.total_served / totals.total_demand
            );
        } else {
            let _ = writeln!(summary, "Demand served: no demand");
        }
        let _ = write!(
            summary,
            "Slots with unmet demand: {}",
            self.unmet_demand.len()
        );

        summary
    }
}

/// Explain why no schedule was returned.
pub fn describe_failure(
    status: SolveStatus,
    diagnostics: &SolveDiagnostics,
    time_limit: Duration,
) -> String {
    let explanation = match status {
        SolveStatus::Infeasible => match &diagnostics.root_conflict {
            Some(conflict) => format!(
                "No schedule satisfies the hard constraints; {conflict}. See the feasibility \
                 analysis for likely causes."
            ),
            None => format!(
                "No schedule satisfies the hard constraints; infeasibility was proven after \
                 {:.2?} of search. See the feasibility analysis for likely causes.",
                diagnostics.solve_time
            ),
        },
        SolveStatus::Timeout => format!(
            "No schedule was found within the time limit of {:.1}s. Increase the time limit or \
             relax the constraints.",
            time_limit.as_secs_f64()
        ),
        SolveStatus::Optimal | SolveStatus::Feasible => "A schedule was found.".to_owned(),
    };

    format!("Status: {status}\n{explanation}")
}
