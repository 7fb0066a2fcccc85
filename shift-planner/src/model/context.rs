use log::debug;
use pumpkin_solver::constraints;
use pumpkin_solver::variables::DomainId;
use pumpkin_solver::variables::TransformableVariable;
use pumpkin_solver::Solver;

use super::units::ItemScale;
use super::CompileError;
use crate::domain::RosterIndex;
use crate::options::ObjectiveWeights;

/// A weighted sum of solver variables.
#[derive(Debug, Clone, Default)]
pub(crate) struct LinearSum {
    terms: Vec<(i32, DomainId)>,
}

impl LinearSum {
    pub(crate) fn add(&mut self, coefficient: i32, variable: DomainId) {
        if coefficient != 0 {
            self.terms.push((coefficient, variable));
        }
    }

    pub(crate) fn with(mut self, coefficient: i32, variable: DomainId) -> LinearSum {
        self.add(coefficient, variable);
        self
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub(crate) fn terms(&self) -> &[(i32, DomainId)] {
        &self.terms
    }

    /// The sum of the variables, each with coefficient one.
    pub(crate) fn of(variables: impl IntoIterator<Item = DomainId>) -> LinearSum {
        LinearSum {
            terms: variables.into_iter().map(|variable| (1, variable)).collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Relation {
    LessOrEqual,
    Equal,
}

/// The state shared by the passes which compile a roster into a solver model.
pub(crate) struct BuildContext<'a> {
    /// The solver to compile the roster into.
    pub(crate) solver: &'a mut Solver,
    pub(crate) roster: &'a RosterIndex<'a>,
    pub(crate) weights: ObjectiveWeights,
    pub(crate) item_scale: ItemScale,

    /// Every variable created, in creation order.
    variables: Vec<DomainId>,
    num_constraints: usize,

    /// `x(e, g, r)` at `(e * num_slots + g) * num_roles + r`.
    pub(crate) assignments: Vec<DomainId>,
    /// `y(e, d, s, r)` at `((e * num_days + d) * num_shifts + s) * num_roles + r`; empty in
    /// free-slot mode.
    pub(crate) shift_assignments: Vec<DomainId>,
    /// Whether an employee can be assigned at all.
    pub(crate) can_work: Vec<bool>,
    /// `w(e, g)` at `e * num_slots + g`.
    pub(crate) working: Vec<DomainId>,
    /// `n(r, g)` at `r * num_slots + g`.
    pub(crate) staffed: Vec<DomainId>,
    /// `p(r, g)` at `r * num_slots + g`, for producing roles.
    pub(crate) production: Vec<Option<DomainId>>,
    /// The output served to customers per slot.
    pub(crate) served: Vec<LinearSum>,
    /// `u(g)`; empty when demand is hard.
    pub(crate) unmet: Vec<DomainId>,
}

impl<'a> BuildContext<'a> {
    pub(crate) fn new(
        solver: &'a mut Solver,
        roster: &'a RosterIndex<'a>,
        weights: ObjectiveWeights,
    ) -> BuildContext<'a> {
        BuildContext {
            solver,
            roster,
            weights,
            item_scale: ItemScale::for_roster(roster),
            variables: Vec::new(),
            num_constraints: 0,
            assignments: Vec::new(),
            shift_assignments: Vec::new(),
            can_work: Vec::new(),
            working: Vec::new(),
            staffed: Vec::new(),
            production: Vec::new(),
            served: Vec::new(),
            unmet: Vec::new(),
        }
    }

    pub(crate) fn num_slots(&self) -> usize {
        self.roster.num_slots()
    }

    pub(crate) fn assignment(&self, employee: usize, slot: usize, role: usize) -> DomainId {
        let index = (employee * self.num_slots() + slot) * self.roster.num_roles() + role;
        self.assignments[index]
    }

    pub(crate) fn working_at(&self, employee: usize, slot: usize) -> DomainId {
        self.working[employee * self.num_slots() + slot]
    }

    pub(crate) fn staffed_at(&self, role: usize, slot: usize) -> DomainId {
        self.staffed[role * self.num_slots() + slot]
    }

    pub(crate) fn production_at(&self, role: usize, slot: usize) -> Option<DomainId> {
        self.production[role * self.num_slots() + slot]
    }

    pub(crate) fn new_variable(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        let variable = self.solver.new_bounded_integer(lower_bound, upper_bound);
        self.variables.push(variable);
        variable
    }

    pub(crate) fn new_boolean(&mut self) -> DomainId {
        self.new_variable(0, 1)
    }

    pub(crate) fn new_zero(&mut self) -> DomainId {
        self.new_variable(0, 0)
    }

    pub(crate) fn variables(&self) -> &[DomainId] {
        &self.variables
    }

    pub(crate) fn num_constraints(&self) -> usize {
        self.num_constraints
    }

    /// Post `sum <= rhs`.
    pub(crate) fn post_at_most(
        &mut self,
        family: &'static str,
        sum: &LinearSum,
        rhs: i32,
    ) -> Result<(), CompileError> {
        self.post(family, sum, rhs, Relation::LessOrEqual)
    }

    /// Post `sum >= rhs`.
    pub(crate) fn post_at_least(
        &mut self,
        family: &'static str,
        sum: &LinearSum,
        rhs: i32,
    ) -> Result<(), CompileError> {
        let negated = LinearSum {
            terms: sum
                .terms
                .iter()
                .map(|&(coefficient, variable)| (-coefficient, variable))
                .collect(),
        };
        self.post(family, &negated, -rhs, Relation::LessOrEqual)
    }

    /// Post `sum == rhs`.
    pub(crate) fn post_equal(
        &mut self,
        family: &'static str,
        sum: &LinearSum,
        rhs: i32,
    ) -> Result<(), CompileError> {
        self.post(family, sum, rhs, Relation::Equal)
    }

    fn post(
        &mut self,
        family: &'static str,
        sum: &LinearSum,
        rhs: i32,
        relation: Relation,
    ) -> Result<(), CompileError> {
        if sum.is_empty() {
            let holds = match relation {
                Relation::LessOrEqual => 0 <= rhs,
                Relation::Equal => rhs == 0,
            };
            return if holds {
                Ok(())
            } else {
                Err(CompileError::RootConflict { family })
            };
        }

        let terms = sum
            .terms
            .iter()
            .map(|&(coefficient, variable)| variable.scaled(coefficient))
            .collect::<Vec<_>>();
        let tag = self.solver.new_constraint_tag();

        let result = match relation {
            Relation::LessOrEqual => self
                .solver
                .add_constraint(constraints::less_than_or_equals(terms, rhs, tag))
                .post(),
            Relation::Equal => self
                .solver
                .add_constraint(constraints::equals(terms, rhs, tag))
                .post(),
        };
        self.num_constraints += 1;

        result.map_err(|_| {
            debug!("Posting a {family} constraint led to a root-level conflict");
            CompileError::RootConflict { family }
        })
    }
}
