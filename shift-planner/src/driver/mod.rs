//! Runs the solver on a compiled roster.
//!
//! Every call owns a fresh [`Solver`]; nothing is shared between calls, so independent rosters
//! can be solved on separate threads. Pumpkin's default seed is fixed, which makes a solve
//! deterministic for a given input, options and time limit.
mod phase;
mod raw_solution;
mod status;

use std::time::Duration;
use std::time::Instant;

use log::debug;
use log::info;
pub use phase::SolvePhase;
use pumpkin_solver::branching::branchers::independent_variable_value_brancher::IndependentVariableValueBrancher;
use pumpkin_solver::branching::value_selection::InDomainMin;
use pumpkin_solver::branching::variable_selection::InputOrder;
use pumpkin_solver::branching::Brancher;
use pumpkin_solver::optimisation::linear_sat_unsat::LinearSatUnsat;
use pumpkin_solver::optimisation::OptimisationDirection;
use pumpkin_solver::results::OptimisationResult;
use pumpkin_solver::results::ProblemSolution;
use pumpkin_solver::results::SolutionReference;
use pumpkin_solver::termination::TimeBudget;
use pumpkin_solver::variables::DomainId;
use pumpkin_solver::Solver;
pub use raw_solution::RawSolution;
pub use raw_solution::ShiftAssignment;
pub use raw_solution::SlotAssignment;
#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use serde::Serialize;
pub use status::SolveStatus;

use crate::domain::RosterIndex;
use crate::domain::SchedulerInput;
use crate::error::SchedulerResult;
use crate::model;
use crate::model::CompileError;
use crate::model::CompiledModel;
use crate::options::SchedulerOptions;
use crate::options::SearchStrategy;

/// Statistics about one solve, used to explain its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolveDiagnostics {
    pub build_time: Duration,
    pub solve_time: Duration,
    pub num_variables: usize,
    pub num_constraints: usize,
    /// Why the model was infeasible before search started, if it was.
    pub root_conflict: Option<String>,
}

/// The result of [`solve`].
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    /// Present exactly when `status` has a solution.
    pub raw: Option<RawSolution>,
    pub diagnostics: SolveDiagnostics,
    pub phase: SolvePhase,
}

/// Validate `input` and solve it within `time_limit`.
///
/// Infeasibility and timeouts are reported through [`SolveOutcome::status`]; errors are reserved
/// for malformed input and numeric overflow.
pub fn solve(
    input: &SchedulerInput,
    time_limit: Duration,
    options: &SchedulerOptions,
) -> SchedulerResult<SolveOutcome> {
    options.validate()?;
    let roster = input.validate()?;
    solve_validated(&roster, time_limit, options)
}

/// Solve an already validated roster.
pub fn solve_validated(
    roster: &RosterIndex<'_>,
    time_limit: Duration,
    options: &SchedulerOptions,
) -> SchedulerResult<SolveOutcome> {
    info!(
        "Scheduling {} employees in {} roles over {} slots (time limit {:?})",
        roster.num_employees(),
        roster.num_roles(),
        roster.num_slots(),
        time_limit
    );

    let build_start = Instant::now();
    let mut solver = Solver::default();
    let compiled = model::compile(&mut solver, roster, options.weights);
    let build_time = build_start.elapsed();

    let mut phase = SolvePhase::Built;
    let model = match compiled {
        Ok(model) => model,
        Err(CompileError::Scheduler(error)) => return Err(error),
        Err(conflict @ CompileError::RootConflict { .. }) => {
            info!("The model is infeasible: {conflict}");
            phase.advance(SolvePhase::Solving)?;
            phase.advance(SolvePhase::Finished(SolveStatus::Infeasible))?;

            return Ok(SolveOutcome {
                status: SolveStatus::Infeasible,
                raw: None,
                diagnostics: SolveDiagnostics {
                    build_time,
                    root_conflict: Some(conflict.to_string()),
                    ..Default::default()
                },
                phase,
            });
        }
    };
    debug!(
        "Built the model in {build_time:?}: {} variables, {} constraints",
        model.variables.len(),
        model.num_constraints
    );

    phase.advance(SolvePhase::Solving)?;
    let solve_start = Instant::now();
    let mut termination = TimeBudget::starting_now(time_limit);
    let (status, raw) = match options.search {
        SearchStrategy::ZeroFirst => {
            let mut brancher = IndependentVariableValueBrancher::new(
                InputOrder::new(&model.variables),
                InDomainMin,
            );
            search(&mut solver, &mut brancher, &mut termination, &model, roster)
        }
        SearchStrategy::Default => {
            let mut brancher = solver.default_brancher();
            search(&mut solver, &mut brancher, &mut termination, &model, roster)
        }
    };
    let solve_time = solve_start.elapsed();
    phase.advance(SolvePhase::Finished(status))?;

    match &raw {
        Some(raw) => info!(
            "Solve finished with status {status} in {solve_time:?}, objective {}",
            model::units::from_minor_currency(raw.objective)
        ),
        None => info!("Solve finished with status {status} in {solve_time:?}"),
    }

    Ok(SolveOutcome {
        status,
        raw,
        diagnostics: SolveDiagnostics {
            build_time,
            solve_time,
            num_variables: model.variables.len(),
            num_constraints: model.num_constraints,
            root_conflict: None,
        },
        phase,
    })
}

fn search<B: Brancher>(
    solver: &mut Solver,
    brancher: &mut B,
    termination: &mut TimeBudget,
    model: &CompiledModel,
    roster: &RosterIndex<'_>,
) -> (SolveStatus, Option<RawSolution>) {
    fn report_improvement<B>(_: &Solver, _: SolutionReference, _: &B) {
        debug!("Found an improving schedule");
    }

    let result = solver.optimise(
        brancher,
        termination,
        LinearSatUnsat::new(
            OptimisationDirection::Minimise,
            model.objective,
            report_improvement,
        ),
    );

    match result {
        OptimisationResult::Optimal(solution) => (
            SolveStatus::Optimal,
            Some(extract(&solution, model, roster)),
        ),
        OptimisationResult::Satisfiable(solution) => (
            SolveStatus::Feasible,
            Some(extract(&solution, model, roster)),
        ),
        OptimisationResult::Unsatisfiable => (SolveStatus::Infeasible, None),
        OptimisationResult::Unknown => (SolveStatus::Timeout, None),
    }
}

fn extract<S: ProblemSolution>(
    solution: &S,
    model: &CompiledModel,
    roster: &RosterIndex<'_>,
) -> RawSolution {
    let value = |variable: DomainId| i64::from(solution.get_integer_value(variable));
    let grid = roster.grid();
    let num_slots = grid.len();
    let num_roles = roster.num_roles();

    let slot_assignments = model
        .assignments
        .iter()
        .enumerate()
        .filter(|&(_, &variable)| value(variable) == 1)
        .map(|(index, _)| {
            let slot_ref = grid.slot_ref((index / num_roles) % num_slots);
            SlotAssignment {
                employee: index / (num_roles * num_slots),
                day: slot_ref.day,
                slot: slot_ref.slot,
                role: index % num_roles,
            }
        })
        .collect();

    let num_shifts = roster.input().shifts.len();
    let num_days = grid.num_days() as usize;
    let shift_assignments = model
        .shift_assignments
        .iter()
        .enumerate()
        .filter(|&(_, &variable)| value(variable) == 1)
        .map(|(index, _)| {
            let shift_index = index / num_roles;
            ShiftAssignment {
                employee: shift_index / (num_days * num_shifts),
                day: ((shift_index / num_shifts) % num_days) as u32,
                shift: shift_index % num_shifts,
                role: index % num_roles,
            }
        })
        .collect();

    let production_units = model
        .production
        .iter()
        .map(|variable| variable.map_or(0, value))
        .collect::<Vec<_>>();

    let served_units = (0..num_slots)
        .map(|slot| {
            roster
                .terminal_roles()
                .map(|role| production_units[role * num_slots + slot])
                .sum::<i64>()
        })
        .collect();

    let unmet_units = if model.unmet.is_empty() {
        vec![0; num_slots]
    } else {
        model.unmet.iter().map(|&variable| value(variable)).collect()
    };

    RawSolution {
        objective: value(model.objective),
        units_per_item: model.item_scale.units_per_item(),
        slot_assignments,
        shift_assignments,
        production_units,
        served_units,
        unmet_units,
    }
}
