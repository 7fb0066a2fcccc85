//! Management insights about a roster, with or without a schedule.
//!
//! The input pass always runs and sizes every role against the demand. When a schedule exists a
//! second pass reports how it uses the staff; when none exists the feasibility analysis lists the
//! likely causes.
mod cost;
mod coverage;
mod feasibility;
mod hiring;
mod input_profile;
mod peaks;
mod role_demand;
mod solution_profile;
mod utilization;

pub use cost::CostAnalysis;
pub use cost::RoleCost;
pub use coverage::CoverageGap;
pub use feasibility::FeasibilityIssue;
pub use feasibility::IssueKind;
pub use feasibility::Severity;
pub use hiring::HiringPriority;
pub use hiring::HiringRecommendation;
pub use input_profile::RoleCapacity;
use input_profile::InputProfile;
use log::debug;
pub use peaks::PeakPeriod;
pub use peaks::StaffingSuggestion;
pub use role_demand::RoleDemand;
#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use serde::Serialize;
use solution_profile::SolutionProfile;
pub use utilization::EmployeeUtilization;
pub use utilization::UtilizationLevel;
pub use utilization::WorkloadDistribution;

use crate::domain::RosterIndex;
use crate::domain::SchedulerInput;
use crate::driver::SolveStatus;
use crate::error::SchedulerResult;
use crate::formatter::ScheduleSolution;
use crate::options::InsightOptions;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InsightsReport {
    pub status: SolveStatus,
    pub capacity_analysis: Vec<RoleCapacity>,
    pub hiring_recommendations: Vec<HiringRecommendation>,
    pub peak_periods: Vec<PeakPeriod>,
    /// Present only when no schedule was found.
    pub feasibility_analysis: Option<Vec<FeasibilityIssue>>,
    pub employee_utilization: Option<Vec<EmployeeUtilization>>,
    pub workload_distribution: Option<WorkloadDistribution>,
    pub cost_analysis: Option<CostAnalysis>,
    pub coverage_gaps: Option<Vec<CoverageGap>>,
    pub role_demand: Option<Vec<RoleDemand>>,
}

impl InsightsReport {
    pub fn capacity_of(&self, role: &str) -> Option<&RoleCapacity> {
        self.capacity_analysis
            .iter()
            .find(|capacity| capacity.role.as_str() == role)
    }

    pub fn hiring_for(&self, role: &str) -> Option<&HiringRecommendation> {
        self.hiring_recommendations
            .iter()
            .find(|recommendation| recommendation.role.as_str() == role)
    }
}

/// Derive insights for `input`, solved with `status`.
///
/// `solution` must be the schedule found for `input`, if any.
pub fn generate(
    input: &SchedulerInput,
    status: SolveStatus,
    solution: Option<&ScheduleSolution>,
    options: &InsightOptions,
) -> SchedulerResult<InsightsReport> {
    let roster = input.validate()?;
    Ok(generate_with_roster(&roster, status, solution, options))
}

pub fn generate_with_roster(
    roster: &RosterIndex<'_>,
    status: SolveStatus,
    solution: Option<&ScheduleSolution>,
    options: &InsightOptions,
) -> InsightsReport {
    let input_profile = InputProfile::collect(roster);
    let hiring_recommendations = hiring::recommend_hires(&input_profile.capacity, options);
    let peak_periods = peaks::find_peaks(roster, &input_profile, options);

    let mut report = InsightsReport {
        status,
        capacity_analysis: Vec::new(),
        hiring_recommendations,
        peak_periods,
        feasibility_analysis: None,
        employee_utilization: None,
        workload_distribution: None,
        cost_analysis: None,
        coverage_gaps: None,
        role_demand: None,
    };

    match solution {
        Some(solution) => {
            let profile = SolutionProfile::collect(roster, &input_profile, solution);
            let employee_utilization = utilization::employee_utilization(roster, &profile);

            report.workload_distribution =
                Some(utilization::workload_distribution(&employee_utilization));
            report.employee_utilization = Some(employee_utilization);
            report.cost_analysis = Some(cost::analyse_cost(roster, &profile, options));
            report.coverage_gaps = Some(coverage::coverage_gaps(solution));
            report.role_demand = Some(role_demand::role_demand(roster, &input_profile, &profile));
        }
        None => {
            report.feasibility_analysis =
                Some(feasibility::analyse(roster, &input_profile, status));
        }
    }

    debug!(
        "Generated insights: {} hiring recommendations, {} peak periods",
        report.hiring_recommendations.len(),
        report.peak_periods.len()
    );

    report.capacity_analysis = input_profile.capacity;
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Employee;
    use crate::domain::Role;
    use crate::driver::RawSolution;
    use crate::driver::SlotAssignment;
    use crate::formatter::format_solution;

    /// Two cooks; `ida` works the first three slots and `jo` does not work.
    fn kitchen() -> (SchedulerInput, RawSolution) {
        let input = SchedulerInput::new(1, 4, 1.0)
            .with_roles([Role::producing("cook", 10.0), Role::producing("baker", 5.0)])
            .with_employees([
                Employee::new("ida", 20.0, 4.0).eligible_for("cook"),
                Employee::new("jo", 10.0, 4.0)
                    .eligible_for("cook")
                    .eligible_for("baker"),
            ])
            .with_uniform_demand(10.0);
        let raw = RawSolution {
            objective: 0,
            units_per_item: 10,
            slot_assignments: (0..3)
                .map(|slot| SlotAssignment {
                    employee: 0,
                    day: 0,
                    slot,
                    role: 0,
                })
                .collect(),
            shift_assignments: Vec::new(),
            production_units: vec![0; 8],
            served_units: vec![50, 50, 100, 0],
            unmet_units: vec![0; 4],
        };
        (input, raw)
    }

    #[test]
    fn solution_sections_follow_the_schedule() {
        let (input, raw) = kitchen();
        let solution = format_solution(&input, &raw, SolveStatus::Feasible);

        let report = generate(
            &input,
            SolveStatus::Feasible,
            Some(&solution),
            &InsightOptions::default(),
        )
        .expect("valid input");

        assert!(report.feasibility_analysis.is_none());

        let utilization = report.employee_utilization.expect("solution present");
        assert_eq!(utilization[0].utilization, 0.75);
        assert_eq!(utilization[0].level, UtilizationLevel::WellUtilized);
        assert_eq!(utilization[1].level, UtilizationLevel::Unused);

        let workload = report.workload_distribution.expect("solution present");
        assert_eq!(workload.mean_hours, 1.5);
        assert_eq!(workload.unused_employees, 1);

        let cost = report.cost_analysis.expect("solution present");
        assert_eq!(cost.total_wage_cost, 60.0);
        // Slots 0 and 1 lack 5 items each and slot 3 lacks 10.
        assert_eq!(cost.opportunity_cost_unmet_demand, 20.0 * 15.0);
        assert_eq!(cost.total_cost, 360.0);
        assert_eq!(cost.cost_per_item_served, Some(3.0));
        assert_eq!(cost.cost_by_role[0].hours, 3.0);
        assert_eq!(cost.cost_by_role[1].wage_cost, 0.0);

        let gaps = report.coverage_gaps.expect("solution present");
        assert_eq!(gaps.len(), 3);
        assert_eq!((gaps[0].slot, gaps[0].coverage_rate), (3, 0.0));
        assert_eq!(gaps[0].severity, Severity::Critical);
        assert_eq!((gaps[1].slot, gaps[1].severity), (0, Severity::High));

        let roles = report.role_demand.expect("solution present");
        assert_eq!(roles[0].working_employees, 1);
        assert_eq!(roles[0].eligible_employees, 2);
        assert_eq!(roles[0].capacity_utilization, 3.0 / 8.0);
        assert_eq!(roles[0].staffed_output, 30.0);
        // Nobody bakes, so the bakers cover none of their half of the demand.
        assert!(!roles[0].is_bottleneck);
        assert!(roles[1].is_bottleneck);
    }

    #[test]
    fn missing_solution_yields_feasibility_analysis() {
        let (input, _) = kitchen();
        let input = input.with_meet_all_demand(true).with_uniform_demand(100.0);

        let report = generate(&input, SolveStatus::Infeasible, None, &InsightOptions::default())
            .expect("valid input");

        assert!(report.employee_utilization.is_none());
        assert!(report.cost_analysis.is_none());
        let issues = report.feasibility_analysis.as_ref().expect("no solution");
        assert_eq!(issues[0].severity, Severity::Critical);
        assert_eq!(
            report.hiring_for("cook").map(|hire| hire.priority),
            Some(HiringPriority::Critical)
        );
        assert!(report.capacity_of("cook").is_some_and(|cook| !cook.is_sufficient));
    }
}
