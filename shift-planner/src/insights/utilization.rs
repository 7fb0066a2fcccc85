#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use serde::Serialize;

use super::solution_profile::SolutionProfile;
use crate::domain::RosterIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UtilizationLevel {
    /// The employee does not work at all.
    Unused,
    /// Below half of the maximum hours.
    Underutilized,
    /// Between half and 85% of the maximum hours.
    WellUtilized,
    /// Above 85% of the maximum hours.
    Overutilized,
}

impl UtilizationLevel {
    fn classify(hours: f64, utilization: f64) -> UtilizationLevel {
        if hours <= 0.0 {
            UtilizationLevel::Unused
        } else if utilization < 0.5 {
            UtilizationLevel::Underutilized
        } else if utilization <= 0.85 {
            UtilizationLevel::WellUtilized
        } else {
            UtilizationLevel::Overutilized
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EmployeeUtilization {
    pub employee_id: String,
    pub hours: f64,
    pub max_hours: f64,
    /// `hours / max_hours`, zero for employees without available hours.
    pub utilization: f64,
    pub level: UtilizationLevel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorkloadDistribution {
    pub mean_hours: f64,
    pub min_hours: f64,
    pub max_hours: f64,
    pub hours_range: f64,
    pub std_dev_hours: f64,
    /// `1 - std_dev / mean` clamped to `[0, 1]`; 1.0 when nobody works.
    pub balance_score: f64,
    pub unused_employees: usize,
    pub underutilized_employees: usize,
    pub well_utilized_employees: usize,
    pub overutilized_employees: usize,
}

pub(crate) fn employee_utilization(
    roster: &RosterIndex<'_>,
    profile: &SolutionProfile<'_>,
) -> Vec<EmployeeUtilization> {
    profile
        .employee_hours
        .iter()
        .enumerate()
        .map(|(employee, &hours)| {
            let employee_data = roster.employee(employee);
            let max_hours = employee_data.max_hours_per_week;
            let utilization = if max_hours > 0.0 {
                hours / max_hours
            } else {
                0.0
            };

            EmployeeUtilization {
                employee_id: employee_data.id.clone(),
                hours,
                max_hours,
                utilization,
                level: UtilizationLevel::classify(hours, utilization),
            }
        })
        .collect()
}

pub(crate) fn workload_distribution(utilization: &[EmployeeUtilization]) -> WorkloadDistribution {
    let count = |level: UtilizationLevel| {
        utilization
            .iter()
            .filter(|employee| employee.level == level)
            .count()
    };
    let unused_employees = count(UtilizationLevel::Unused);
    let underutilized_employees = count(UtilizationLevel::Underutilized);
    let well_utilized_employees = count(UtilizationLevel::WellUtilized);
    let overutilized_employees = count(UtilizationLevel::Overutilized);

    if utilization.is_empty() {
        return WorkloadDistribution {
            mean_hours: 0.0,
            min_hours: 0.0,
            max_hours: 0.0,
            hours_range: 0.0,
            std_dev_hours: 0.0,
            balance_score: 1.0,
            unused_employees,
            underutilized_employees,
            well_utilized_employees,
            overutilized_employees,
        };
    }

    let hours = utilization
        .iter()
        .map(|employee| employee.hours)
        .collect::<Vec<_>>();
    let n = hours.len() as f64;
    let mean_hours = hours.iter().sum::<f64>() / n;
    let min_hours = hours.iter().copied().fold(f64::INFINITY, f64::min);
    let max_hours = hours.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let variance = hours
        .iter()
        .map(|&hours| (hours - mean_hours).powi(2))
        .sum::<f64>()
        / n;
    let std_dev_hours = variance.sqrt();
    let balance_score = if mean_hours > 0.0 {
        (1.0 - std_dev_hours / mean_hours).clamp(0.0, 1.0)
    } else {
        1.0
    };

    WorkloadDistribution {
        mean_hours,
        min_hours,
        max_hours,
        hours_range: max_hours - min_hours,
        std_dev_hours,
        balance_score,
        unused_employees,
        underutilized_employees,
        well_utilized_employees,
        overutilized_employees,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: &str, hours: f64, max_hours: f64) -> EmployeeUtilization {
        let utilization = hours / max_hours;
        EmployeeUtilization {
            employee_id: id.to_owned(),
            hours,
            max_hours,
            utilization,
            level: UtilizationLevel::classify(hours, utilization),
        }
    }

    #[test]
    fn utilization_buckets() {
        assert_eq!(UtilizationLevel::classify(0.0, 0.0), UtilizationLevel::Unused);
        assert_eq!(UtilizationLevel::classify(4.0, 0.1), UtilizationLevel::Underutilized);
        assert_eq!(UtilizationLevel::classify(20.0, 0.5), UtilizationLevel::WellUtilized);
        assert_eq!(UtilizationLevel::classify(34.0, 0.85), UtilizationLevel::WellUtilized);
        assert_eq!(UtilizationLevel::classify(36.0, 0.9), UtilizationLevel::Overutilized);
    }

    #[test]
    fn distribution_statistics() {
        let employees = [
            employee("a", 10.0, 40.0),
            employee("b", 30.0, 40.0),
            employee("c", 0.0, 40.0),
            employee("d", 40.0, 40.0),
        ];

        let distribution = workload_distribution(&employees);

        assert_eq!(distribution.mean_hours, 20.0);
        assert_eq!(distribution.min_hours, 0.0);
        assert_eq!(distribution.max_hours, 40.0);
        assert_eq!(distribution.hours_range, 40.0);
        // Deviations of 10, 10, 20 and 20 hours.
        assert!((distribution.std_dev_hours - 250.0_f64.sqrt()).abs() < 1e-9);
        assert!((distribution.balance_score - (1.0 - 250.0_f64.sqrt() / 20.0)).abs() < 1e-9);
        assert_eq!(distribution.unused_employees, 1);
        assert_eq!(distribution.underutilized_employees, 1);
        assert_eq!(distribution.well_utilized_employees, 1);
        assert_eq!(distribution.overutilized_employees, 1);
    }

    #[test]
    fn idle_roster_is_balanced() {
        let employees = [employee("a", 0.0, 40.0), employee("b", 0.0, 20.0)];

        let distribution = workload_distribution(&employees);

        assert_eq!(distribution.balance_score, 1.0);
        assert_eq!(distribution.unused_employees, 2);
    }
}
