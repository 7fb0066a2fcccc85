#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

mod helpers;

use std::thread;

use helpers::headcount;
use helpers::init_logging;
use helpers::runs;
use helpers::single_role_day;
use helpers::staff;
use helpers::working_slots;
use helpers::TIME_LIMIT_SECONDS;
use shift_planner::domain::Demand;
use shift_planner::domain::Employee;
use shift_planner::domain::Role;
use shift_planner::domain::SchedulerInput;
use shift_planner::driver::SolveStatus;
use shift_planner::solve_schedule;

#[test]
fn hour_caps_and_consecutive_limits_hold() {
    init_logging();
    let employees = (0..3)
        .map(|index| {
            Employee::new(format!("crew{index}"), 12.0, 3.0)
                .eligible_for("crew")
                .with_max_consec_slots(2)
        })
        .collect();
    let input = single_role_day(8, 10.0, employees, 20.0);

    let solution = solve_schedule(&input, TIME_LIMIT_SECONDS)
        .expect("well-formed input")
        .solution
        .expect("soft demand is always feasible");

    assert!(solution.totals.total_hours > 0.0);
    for stats in &solution.employee_stats {
        assert!(stats.work_hours <= 3.0, "{} works too long", stats.employee_id);
        assert!(stats.longest_run_slots <= 2);
    }
    for ((employee, _), slots) in working_slots(&solution) {
        assert!(
            runs(&slots).iter().all(|&run| run <= 2),
            "{employee} works more than two slots in a row"
        );
    }
}

#[test]
fn minimum_presence_holds_in_every_demanded_slot() {
    init_logging();
    let input = SchedulerInput::new(1, 6, 1.0)
        .with_roles([
            Role::producing("cook", 10.0),
            Role::support("supervisor").with_min_present(1),
        ])
        .with_employees(staff("cook", 2, &["cook"], 40.0))
        .with_employees(staff("lead", 2, &["supervisor"], 40.0))
        .with_demand(Demand::from_fn(1, 6, |_, slot| {
            if (1..5).contains(&slot) {
                10.0
            } else {
                0.0
            }
        }))
        .with_meet_all_demand(true);

    let solution = solve_schedule(&input, TIME_LIMIT_SECONDS)
        .expect("well-formed input")
        .solution
        .expect("enough staff for every slot");

    let supervisors = headcount(&solution, "supervisor");
    let cooks = headcount(&solution, "cook");
    for slot in 1..5 {
        assert!(supervisors.get(&(0, slot)).copied().unwrap_or(0) >= 1);
        assert!(cooks.get(&(0, slot)).copied().unwrap_or(0) >= 1);
    }
    assert!(solution.unmet_demand.is_empty());
}

#[test]
fn minimum_shift_length_holds() {
    init_logging();
    let input = single_role_day(
        8,
        10.0,
        vec![Employee::new("solo", 10.0, 40.0).eligible_for("crew")],
        0.0,
    )
    .with_demand(Demand::from_fn(1, 8, |_, slot| if slot == 4 { 10.0 } else { 0.0 }))
    .with_min_shift_length_slots(3)
    .with_meet_all_demand(true);

    let solution = solve_schedule(&input, TIME_LIMIT_SECONDS)
        .expect("well-formed input")
        .solution
        .expect("one block covers the demanded slot");

    let slots = working_slots(&solution);
    let solo = &slots[&("solo".to_owned(), 0)];
    assert!(solo.contains(&4));
    assert!(runs(solo).iter().all(|&run| run >= 3));
    assert_eq!(solution.totals.total_hours, 3.0);
}

fn split_demand(min_rest_slots: u32) -> SchedulerInput {
    single_role_day(
        8,
        10.0,
        vec![Employee::new("solo", 10.0, 40.0)
            .eligible_for("crew")
            .with_max_consec_slots(1)],
        0.0,
    )
    .with_demand(Demand::from_fn(1, 8, |_, slot| {
        if slot == 0 || slot == 3 {
            10.0
        } else {
            0.0
        }
    }))
    .with_min_rest_slots(min_rest_slots)
    .with_meet_all_demand(true)
}

#[test]
fn rest_separates_blocks_within_a_day() {
    init_logging();
    let solution = solve_schedule(&split_demand(2), TIME_LIMIT_SECONDS)
        .expect("well-formed input")
        .solution
        .expect("two idle slots fit between the demanded slots");

    for ((employee, _), slots) in working_slots(&solution) {
        for pair in slots.windows(2) {
            let idle = pair[1] - pair[0] - 1;
            assert!(
                idle == 0 || idle >= 2,
                "{employee} rests {idle} slots between blocks"
            );
        }
    }
    let solo = &working_slots(&solution)[&("solo".to_owned(), 0)];
    assert!(solo.contains(&0) && solo.contains(&3));
}

#[test]
fn rest_longer_than_the_gap_is_infeasible() {
    init_logging();
    let outcome = solve_schedule(&split_demand(3), TIME_LIMIT_SECONDS).expect("well-formed input");

    assert_eq!(outcome.status, SolveStatus::Infeasible);
    assert!(outcome.solution.is_none());
}

#[test]
fn zero_demand_costs_nothing() {
    init_logging();
    let input = single_role_day(6, 10.0, staff("crew", 3, &["crew"], 40.0), 0.0);

    let solution = solve_schedule(&input, TIME_LIMIT_SECONDS)
        .expect("well-formed input")
        .solution
        .expect("an empty schedule is always feasible");

    assert!(solution.schedule.is_empty());
    assert_eq!(solution.totals.total_wage_cost, 0.0);
    assert!(solution.objective_value.abs() < 1e-6);
}

#[test]
fn repeated_solves_agree() {
    init_logging();
    let input = single_role_day(6, 10.0, staff("crew", 3, &["crew"], 4.0), 15.0);

    let first = solve_schedule(&input, TIME_LIMIT_SECONDS)
        .expect("well-formed input")
        .solution
        .expect("soft demand is always feasible");
    let second = solve_schedule(&input, TIME_LIMIT_SECONDS)
        .expect("well-formed input")
        .solution
        .expect("soft demand is always feasible");

    assert_eq!(first.objective_value, second.objective_value);
}

#[test]
fn independent_rosters_solve_concurrently() {
    init_logging();
    let rosters = [
        single_role_day(4, 10.0, staff("a", 2, &["crew"], 40.0), 10.0),
        single_role_day(6, 5.0, staff("b", 3, &["crew"], 40.0), 5.0),
    ];

    let objectives = thread::scope(|scope| {
        let handles = rosters
            .iter()
            .map(|input| scope.spawn(move || solve_schedule(input, TIME_LIMIT_SECONDS)))
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .expect("solver thread panicked")
                    .expect("well-formed input")
                    .solution
                    .map(|solution| solution.objective_value)
            })
            .collect::<Vec<_>>()
    });

    for (input, objective) in rosters.iter().zip(objectives) {
        let sequential = solve_schedule(input, TIME_LIMIT_SECONDS)
            .expect("well-formed input")
            .solution
            .map(|solution| solution.objective_value);
        assert_eq!(objective, sequential);
    }
}
