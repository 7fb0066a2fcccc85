#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

mod helpers;

use helpers::init_logging;
use helpers::TIME_LIMIT_SECONDS;
use shift_planner::chain::ChainRule;
use shift_planner::domain::RoleId;
use shift_planner::domain::SchedulerInput;
use shift_planner::solve_schedule;

const CAFE: &str = r#"{
    "employees": [
        { "id": "ana", "wage": 16.0, "max_hours_per_week": 6.0, "role_eligibility": ["barista"] },
        { "id": "ben", "wage": 14.0, "max_hours_per_week": 6.0, "role_eligibility": ["roaster"] }
    ],
    "roles": [
        { "id": "roaster", "producing": true, "items_per_hour": 20.0 },
        { "id": "barista", "producing": true, "items_per_hour": 10.0, "is_independent": false }
    ],
    "chains": [
        { "upstream": ["roaster"], "downstream": "barista", "rule": "Pooled" }
    ],
    "num_days": 1,
    "num_slots_per_day": 2,
    "slot_len_hour": 1.0,
    "demand": [
        { "day": 0, "slot": 0, "quantity": 5.0 },
        { "day": 0, "slot": 1, "quantity": 0.0 }
    ]
}"#;

#[test]
fn input_is_read_from_json_with_defaults() {
    let input: SchedulerInput = serde_json::from_str(CAFE).expect("valid json");

    assert_eq!(input.employees[0].max_consec_slots, u32::MAX);
    assert!(input.roles[0].is_independent);
    assert!(!input.roles[1].is_independent);
    assert!(matches!(input.chains[0].rule, ChainRule::Pooled));
    assert!(!input.meet_all_demand);
    assert!(!input.fixed_shifts);
    assert!(input.employees[1].is_eligible(&RoleId::from("roaster")));
    assert!(input.validate().is_ok());
}

#[test]
fn outcome_serialises() {
    init_logging();
    let input: SchedulerInput = serde_json::from_str(CAFE).expect("valid json");

    let outcome = solve_schedule(&input, TIME_LIMIT_SECONDS).expect("well-formed input");
    let solution = outcome.solution.expect("soft demand is always feasible");

    let json = serde_json::to_value(&solution).expect("serialisable");
    assert_eq!(json["status"], "Optimal");
    assert!(serde_json::to_string(&outcome.insights).is_ok());
    assert!(serde_json::to_string(&outcome.diagnostics).is_ok());
}

#[test]
fn input_survives_a_round_trip() {
    let input: SchedulerInput = serde_json::from_str(CAFE).expect("valid json");

    let json = serde_json::to_string(&input).expect("serialisable");
    let read_back: SchedulerInput = serde_json::from_str(&json).expect("valid json");

    assert_eq!(read_back.employees, input.employees);
    assert_eq!(read_back.roles, input.roles);
    assert_eq!(read_back.demand, input.demand);
}

#[test]
fn repeated_demand_slots_are_rejected() {
    let json = CAFE.replace(
        r#"{ "day": 0, "slot": 1, "quantity": 0.0 }"#,
        r#"{ "day": 0, "slot": 0, "quantity": 8.0 }"#,
    );

    let error = serde_json::from_str::<SchedulerInput>(&json)
        .expect_err("slot 0 is given twice")
        .to_string();
    assert!(
        error.contains("more than once for day 0, slot 0"),
        "unexpected error: {error}"
    );
}
