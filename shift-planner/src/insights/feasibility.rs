//! Likely causes of a solve that returned no schedule.
//!
//! None of these checks is complete: the hard constraints interact, so a roster can pass all of
//! them and still be infeasible. The checks look for the contradictions that can be read off the
//! input directly.
#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use serde::Serialize;

use super::input_profile::InputProfile;
use super::input_profile::RATIO_EPSILON;
use crate::domain::RoleId;
use crate::domain::RosterIndex;
use crate::driver::SolveStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeasibilityIssue {
    pub severity: Severity,
    pub kind: IssueKind,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IssueKind {
    /// Something is required of the role but nobody may work it.
    NoEligibleEmployees { role: RoleId },
    /// The role has to be staffed by more employees than are eligible for it.
    InsufficientHeadcount {
        role: RoleId,
        min_present: u32,
        eligible_employees: usize,
    },
    CapacityShortfall { role: RoleId, capacity_ratio: f64 },
    /// The demand of a slot exceeds what the whole roster can serve in one slot.
    PeakExceedsThroughput {
        day: u32,
        slot: u32,
        demand: f64,
        max_output: f64,
        slots_affected: usize,
    },
    /// The minimum shift length does not fit in a day.
    ShiftLongerThanDay {
        min_shift_length_slots: u32,
        slots_per_day: u32,
    },
    /// These employees may never work more consecutive slots than the minimum shift length.
    ShiftLongerThanConsecutiveLimit { employees: Vec<String> },
    /// No employee fits any of the shift templates.
    NoUsableShiftTemplate,
    TimeLimitReached,
    NoSimpleCause,
}

pub(crate) fn analyse(
    roster: &RosterIndex<'_>,
    profile: &InputProfile,
    status: SolveStatus,
) -> Vec<FeasibilityIssue> {
    let input = roster.input();
    let mut issues = Vec::new();

    for (role, capacity) in profile.capacity.iter().enumerate() {
        let role_data = roster.role(role);
        let required = capacity.role_demand > 0.0
            || (role_data.min_present > 0 && profile.open_slots > 0);
        if !required {
            continue;
        }

        if capacity.eligible_employees == 0 {
            issues.push(FeasibilityIssue {
                severity: Severity::Critical,
                description: format!("no employee is eligible for {}", role_data.id),
                kind: IssueKind::NoEligibleEmployees {
                    role: role_data.id.clone(),
                },
            });
            continue;
        }

        if input.meet_all_demand
            && profile.open_slots > 0
            && role_data.min_present as usize > capacity.eligible_employees
        {
            issues.push(FeasibilityIssue {
                severity: Severity::Critical,
                description: format!(
                    "{} requires {} employees present but only {} are eligible",
                    role_data.id, role_data.min_present, capacity.eligible_employees
                ),
                kind: IssueKind::InsufficientHeadcount {
                    role: role_data.id.clone(),
                    min_present: role_data.min_present,
                    eligible_employees: capacity.eligible_employees,
                },
            });
        }

        if let Some(ratio) = capacity.capacity_ratio {
            if ratio < 1.0 - RATIO_EPSILON {
                issues.push(FeasibilityIssue {
                    severity: if ratio < 0.5 {
                        Severity::Critical
                    } else {
                        Severity::High
                    },
                    description: format!(
                        "{} can cover only {:.1}% of what is required of it ({:.1} of {:.1} hours)",
                        role_data.id,
                        ratio * 100.0,
                        capacity.total_available_hours,
                        capacity.required_hours
                    ),
                    kind: IssueKind::CapacityShortfall {
                        role: role_data.id.clone(),
                        capacity_ratio: ratio,
                    },
                });
            }
        }
    }

    if input.meet_all_demand {
        if let Some(issue) = peak_above_throughput(roster, profile) {
            issues.push(issue);
        }
    }

    issues.extend(labour_rule_contradictions(roster));

    if status == SolveStatus::Timeout {
        issues.push(FeasibilityIssue {
            severity: Severity::Low,
            kind: IssueKind::TimeLimitReached,
            description: "the time limit was reached before any schedule was found".to_owned(),
        });
    } else if issues.is_empty() {
        issues.push(FeasibilityIssue {
            severity: Severity::Low,
            kind: IssueKind::NoSimpleCause,
            description: "no single cause found; the hard constraints conflict in combination"
                .to_owned(),
        });
    }

    issues.sort_by_key(|issue| issue.severity);
    issues
}

fn peak_above_throughput(
    roster: &RosterIndex<'_>,
    profile: &InputProfile,
) -> Option<FeasibilityIssue> {
    let max_output = profile.max_slot_output;
    let exceeding = roster
        .demand_per_slot()
        .iter()
        .enumerate()
        .filter(|&(_, &demand)| demand > max_output + RATIO_EPSILON)
        .collect::<Vec<_>>();

    let &(index, &demand) = exceeding
        .iter()
        .max_by(|(_, left), (_, right)| left.total_cmp(right))?;
    let slot_ref = roster.grid().slot_ref(index);

    Some(FeasibilityIssue {
        severity: Severity::High,
        description: format!(
            "{} slots demand more than the {max_output:.1} items the roster can serve at once, \
             up to {demand:.1} on day {} slot {}",
            exceeding.len(),
            slot_ref.day,
            slot_ref.slot
        ),
        kind: IssueKind::PeakExceedsThroughput {
            day: slot_ref.day,
            slot: slot_ref.slot,
            demand,
            max_output,
            slots_affected: exceeding.len(),
        },
    })
}

fn labour_rule_contradictions(roster: &RosterIndex<'_>) -> Vec<FeasibilityIssue> {
    let input = roster.input();
    let mut issues = Vec::new();

    let staff = (0..roster.num_employees())
        .filter(|&employee| !roster.employee(employee).role_eligibility.is_empty())
        .collect::<Vec<_>>();

    if input.fixed_shifts {
        let usable = staff.iter().any(|&employee| {
            let limit = roster
                .employee(employee)
                .max_consec_slots
                .min(roster.max_working_slots(employee));
            input.shifts.iter().any(|shift| shift.length_slots <= limit)
        });
        if !staff.is_empty() && !usable {
            issues.push(FeasibilityIssue {
                severity: Severity::Critical,
                kind: IssueKind::NoUsableShiftTemplate,
                description: "every shift template is longer than any employee may work"
                    .to_owned(),
            });
        }
        return issues;
    }

    let length = input.min_shift_length_slots;
    if length > input.num_slots_per_day {
        issues.push(FeasibilityIssue {
            severity: Severity::Critical,
            kind: IssueKind::ShiftLongerThanDay {
                min_shift_length_slots: length,
                slots_per_day: input.num_slots_per_day,
            },
            description: format!(
                "the minimum shift of {length} slots is longer than a day of {} slots",
                input.num_slots_per_day
            ),
        });
        return issues;
    }

    let limited = staff
        .iter()
        .map(|&employee| roster.employee(employee))
        .filter(|employee| employee.max_consec_slots < length)
        .map(|employee| employee.id.clone())
        .collect::<Vec<_>>();
    if !limited.is_empty() {
        let severity = if limited.len() == staff.len() {
            Severity::Critical
        } else {
            Severity::Medium
        };
        issues.push(FeasibilityIssue {
            severity,
            description: format!(
                "{} of {} employees may not work the minimum shift of {length} slots in a row",
                limited.len(),
                staff.len()
            ),
            kind: IssueKind::ShiftLongerThanConsecutiveLimit { employees: limited },
        });
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Employee;
    use crate::domain::Role;
    use crate::domain::SchedulerInput;
    use crate::domain::Shift;

    fn analyse_input(input: &SchedulerInput, status: SolveStatus) -> Vec<FeasibilityIssue> {
        let roster = input.validate().expect("valid input");
        let profile = InputProfile::collect(&roster);
        analyse(&roster, &profile, status)
    }

    #[test]
    fn understaffed_role_is_a_critical_shortfall() {
        let input = SchedulerInput::new(7, 12, 1.0)
            .with_roles([Role::producing("picker", 10.0)])
            .with_employees([
                Employee::new("ann", 15.0, 40.0).eligible_for("picker"),
                Employee::new("ben", 15.0, 40.0).eligible_for("picker"),
            ])
            .with_uniform_demand(1000.0)
            .with_meet_all_demand(true);

        let issues = analyse_input(&input, SolveStatus::Infeasible);

        assert_eq!(issues[0].severity, Severity::Critical);
        assert!(matches!(
            &issues[0].kind,
            IssueKind::CapacityShortfall { role, .. } if role.as_str() == "picker"
        ));
        assert!(issues
            .iter()
            .any(|issue| matches!(issue.kind, IssueKind::PeakExceedsThroughput { slots_affected: 84, .. })));
    }

    #[test]
    fn missing_and_thin_staff_are_reported() {
        let input = SchedulerInput::new(1, 4, 1.0)
            .with_roles([
                Role::producing("cook", 10.0),
                Role::support("manager").with_min_present(2),
            ])
            .with_employees([Employee::new("max", 20.0, 40.0).eligible_for("manager")])
            .with_uniform_demand(1.0)
            .with_meet_all_demand(true);

        let issues = analyse_input(&input, SolveStatus::Infeasible);

        assert!(issues.iter().any(|issue| matches!(
            &issue.kind,
            IssueKind::NoEligibleEmployees { role } if role.as_str() == "cook"
        )));
        assert!(issues.iter().any(|issue| matches!(
            issue.kind,
            IssueKind::InsufficientHeadcount {
                min_present: 2,
                eligible_employees: 1,
                ..
            }
        )));
    }

    #[test]
    fn labour_rules_that_rule_out_work_are_reported() {
        let input = SchedulerInput::new(1, 4, 1.0)
            .with_roles([Role::producing("cook", 10.0)])
            .with_employees([
                Employee::new("cy", 20.0, 40.0)
                    .eligible_for("cook")
                    .with_max_consec_slots(2),
                Employee::new("di", 20.0, 40.0).eligible_for("cook"),
            ])
            .with_min_shift_length_slots(3)
            .with_uniform_demand(0.0);

        let issues = analyse_input(&input, SolveStatus::Infeasible);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Medium);
        assert_eq!(
            issues[0].kind,
            IssueKind::ShiftLongerThanConsecutiveLimit {
                employees: vec!["cy".to_owned()],
            }
        );

        let too_long = input.clone().with_min_shift_length_slots(5);
        let issues = analyse_input(&too_long, SolveStatus::Infeasible);
        assert_eq!(issues[0].severity, Severity::Critical);
        assert!(matches!(issues[0].kind, IssueKind::ShiftLongerThanDay { .. }));
    }

    #[test]
    fn templates_nobody_can_work_are_reported() {
        let input = SchedulerInput::new(1, 8, 1.0)
            .with_roles([Role::producing("cook", 10.0)])
            .with_employees([Employee::new("ed", 20.0, 3.0).eligible_for("cook")])
            .with_shift_templates([Shift::new("long", 0, 6)])
            .with_uniform_demand(0.0);

        let issues = analyse_input(&input, SolveStatus::Infeasible);

        assert_eq!(issues[0].kind, IssueKind::NoUsableShiftTemplate);
    }

    #[test]
    fn timeouts_and_unexplained_infeasibility_get_a_note() {
        let input = SchedulerInput::new(1, 2, 1.0).with_uniform_demand(0.0);

        let timeout = analyse_input(&input, SolveStatus::Timeout);
        assert_eq!(timeout[0].kind, IssueKind::TimeLimitReached);

        let infeasible = analyse_input(&input, SolveStatus::Infeasible);
        assert_eq!(infeasible[0].kind, IssueKind::NoSimpleCause);
    }
}
