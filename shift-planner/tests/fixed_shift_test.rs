#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

mod helpers;

use helpers::init_logging;
use helpers::single_role_day;
use helpers::TIME_LIMIT_SECONDS;
use shift_planner::domain::Demand;
use shift_planner::domain::Employee;
use shift_planner::domain::SchedulerInput;
use shift_planner::domain::Shift;
use shift_planner::driver::SolveStatus;
use shift_planner::formatter::Placement;
use shift_planner::insights::IssueKind;
use shift_planner::solve_schedule;

fn two_shift_day(busy: impl Fn(u32) -> bool) -> SchedulerInput {
    single_role_day(
        8,
        10.0,
        vec![Employee::new("rae", 20.0, 40.0).eligible_for("crew")],
        0.0,
    )
    .with_shift_templates([Shift::new("early", 0, 4), Shift::new("late", 4, 4)])
    .with_demand(Demand::from_fn(1, 8, |_, slot| {
        if busy(slot) {
            10.0
        } else {
            0.0
        }
    }))
    .with_meet_all_demand(true)
}

#[test]
fn whole_templates_are_assigned() {
    init_logging();
    let input = two_shift_day(|slot| slot < 3);

    let solution = solve_schedule(&input, TIME_LIMIT_SECONDS)
        .expect("well-formed input")
        .solution
        .expect("the early shift covers the demand");

    assert_eq!(solution.schedule.len(), 1);
    assert_eq!(
        solution.schedule[0].placement,
        Placement::Shift {
            shift_id: "early".to_owned(),
            start_slot: 0,
            end_slot: 4,
        }
    );
    assert_eq!(solution.totals.total_hours, 4.0);
}

#[test]
fn both_templates_when_demand_spans_the_day() {
    init_logging();
    let input = two_shift_day(|slot| slot == 1 || slot == 6);

    let solution = solve_schedule(&input, TIME_LIMIT_SECONDS)
        .expect("well-formed input")
        .solution
        .expect("both shifts together cover the demand");

    let shifts = solution
        .schedule
        .iter()
        .filter_map(|entry| match &entry.placement {
            Placement::Shift { shift_id, .. } => Some(shift_id.as_str()),
            Placement::Slot { .. } => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(shifts, ["early", "late"]);
    assert_eq!(solution.totals.total_hours, 8.0);
}

#[test]
fn templates_longer_than_allowed_are_infeasible() {
    init_logging();
    let input = single_role_day(
        8,
        10.0,
        vec![Employee::new("sid", 20.0, 2.0).eligible_for("crew")],
        10.0,
    )
    .with_shift_templates([Shift::new("full", 0, 8)])
    .with_meet_all_demand(true);

    let outcome = solve_schedule(&input, TIME_LIMIT_SECONDS).expect("well-formed input");

    assert_eq!(outcome.status, SolveStatus::Infeasible);
    assert!(outcome.solution.is_none());
    assert!(outcome
        .insights
        .feasibility_analysis
        .expect("no solution was found")
        .iter()
        .any(|issue| issue.kind == IssueKind::NoUsableShiftTemplate));
}
