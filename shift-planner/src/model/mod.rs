//! Compiles a validated roster into a Pumpkin model.
//!
//! The model is built by a fixed sequence of passes over a shared [`BuildContext`], each adding
//! one family of variables or constraints.
mod context;
mod create_objective;
mod define_assignments;
mod demand_mode;
mod link_working;
mod post_labour_rules;
mod post_production;
mod post_staffing;
pub(crate) mod units;

use context::BuildContext;
use log::debug;
use pumpkin_solver::variables::DomainId;
use pumpkin_solver::Solver;
use thiserror::Error;

use crate::domain::RosterIndex;
use crate::error::SchedulerError;
use crate::options::ObjectiveWeights;

#[derive(Debug, Error)]
pub(crate) enum CompileError {
    /// Posting a constraint made the model unsatisfiable before search started.
    #[error("posting the {family} constraints caused a root-level conflict")]
    RootConflict { family: &'static str },

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}

/// The solver variables of a compiled roster, laid out as in the build context.
#[derive(Debug)]
pub(crate) struct CompiledModel {
    pub(crate) assignments: Vec<DomainId>,
    pub(crate) shift_assignments: Vec<DomainId>,
    pub(crate) production: Vec<Option<DomainId>>,
    pub(crate) unmet: Vec<DomainId>,
    pub(crate) objective: DomainId,
    pub(crate) item_scale: units::ItemScale,
    /// Every variable, in creation order; the objective comes last.
    pub(crate) variables: Vec<DomainId>,
    pub(crate) num_constraints: usize,
}

pub(crate) fn compile(
    solver: &mut Solver,
    roster: &RosterIndex<'_>,
    weights: ObjectiveWeights,
) -> Result<CompiledModel, CompileError> {
    let mut context = BuildContext::new(solver, roster, weights);
    let demand_policy = demand_mode::select(roster.input().meet_all_demand);

    define_assignments::run(&mut context)?;
    link_working::run(&mut context)?;
    post_labour_rules::run(&mut context)?;
    post_staffing::run(&mut context)?;
    post_production::run(&mut context)?;
    demand_policy.couple(&mut context)?;
    let objective = create_objective::run(&mut context)?;

    debug!(
        "Compiled a {} demand model with {} variables and {} constraints",
        demand_policy.name(),
        context.variables().len(),
        context.num_constraints()
    );

    Ok(CompiledModel {
        variables: context.variables().to_vec(),
        num_constraints: context.num_constraints(),
        assignments: context.assignments,
        shift_assignments: context.shift_assignments,
        production: context.production,
        unmet: context.unmet,
        item_scale: context.item_scale,
        objective,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Demand;
    use crate::domain::Employee;
    use crate::domain::Role;
    use crate::domain::SchedulerInput;

    fn bakery(demand: f64) -> SchedulerInput {
        SchedulerInput::new(1, 4, 1.0)
            .with_roles([Role::producing("baker", 10.0)])
            .with_employees([
                Employee::new("ada", 20.0, 40.0).eligible_for("baker"),
                Employee::new("bo", 18.0, 40.0),
            ])
            .with_uniform_demand(demand)
    }

    #[test]
    fn variables_exist_for_every_combination() {
        let input = bakery(5.0);
        let roster = input.validate().expect("valid input");
        let mut solver = Solver::default();

        let model = compile(&mut solver, &roster, ObjectiveWeights::default()).expect("compiles");

        assert_eq!(model.assignments.len(), 2 * 4);
        assert_eq!(model.production.len(), 4);
        assert_eq!(model.unmet.len(), 4);
        assert!(model.shift_assignments.is_empty());
        assert_eq!(model.variables.last(), Some(&model.objective));
    }

    #[test]
    fn hard_demand_beyond_capacity_is_a_root_conflict() {
        let input = bakery(1000.0).with_meet_all_demand(true);
        let roster = input.validate().expect("valid input");
        let mut solver = Solver::default();

        let result = compile(&mut solver, &roster, ObjectiveWeights::default());

        assert!(matches!(
            result,
            Err(CompileError::RootConflict { family: "demand" })
        ));
    }

    #[test]
    fn empty_roster_compiles() {
        let input = SchedulerInput::new(0, 0, 1.0).with_demand(Demand::default());
        let roster = input.validate().expect("valid input");
        let mut solver = Solver::default();

        let model = compile(&mut solver, &roster, ObjectiveWeights::default()).expect("compiles");

        assert!(model.assignments.is_empty());
        assert!(model.unmet.is_empty());
    }

    #[test]
    fn hard_demand_has_no_unmet_variables() {
        let input = bakery(5.0).with_meet_all_demand(true);
        let roster = input.validate().expect("valid input");
        let mut solver = Solver::default();

        let model = compile(&mut solver, &roster, ObjectiveWeights::default()).expect("compiles");

        assert!(model.unmet.is_empty());
    }
}
