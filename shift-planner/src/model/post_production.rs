//! Define the production `p(r, g)` of producing roles and cap it through the production chains.
use log::debug;
use pumpkin_solver::variables::DomainId;

use super::context::BuildContext;
use super::context::LinearSum;
use super::units::to_solver_int;
use super::units::SCALE_DENOMINATOR;
use super::CompileError;
use crate::chain::Capacity;
use crate::chain::CapacityAlgebra;
use crate::chain::ContributionRule;
use crate::domain::RoleId;
use crate::error::SchedulerError;

pub(crate) fn run(context: &mut BuildContext) -> Result<(), CompileError> {
    let roster = context.roster;
    let num_slots = context.num_slots();
    let slot_len_hour = roster.input().slot_len_hour;

    let mut production = Vec::with_capacity(roster.num_roles() * num_slots);
    let mut upper_bounds = vec![0; roster.num_roles()];
    for role in 0..roster.num_roles() {
        let role_data = roster.role(role);
        if !role_data.producing {
            production.extend(std::iter::repeat(None).take(num_slots));
            continue;
        }

        let throughput = context.item_scale.throughput(role_data, slot_len_hour);
        let staff_bound = (0..roster.num_employees())
            .filter(|&employee| context.can_work[employee] && roster.is_eligible(employee, role))
            .count() as i64;
        let upper_bound = to_solver_int("production per slot", throughput * staff_bound)?;
        let throughput = to_solver_int("throughput per slot", throughput)?;
        upper_bounds[role] = upper_bound;

        for slot in 0..num_slots {
            let output = context.new_variable(0, upper_bound);
            if upper_bound > 0 {
                let sum = LinearSum::default()
                    .with(1, output)
                    .with(-throughput, context.staffed_at(role, slot));
                context.post_at_most("production", &sum, 0)?;
            }
            production.push(Some(output));
        }
    }
    context.production = production;

    for chain in roster.chains() {
        let downstream_id = &roster.role(chain.downstream).id;
        for slot in 0..num_slots {
            let Some(downstream) = context.production_at(chain.downstream, slot) else {
                continue;
            };

            let mut algebra = SolverAlgebra {
                context: &mut *context,
                capacities: Vec::new(),
                foreign_handle: false,
                error: None,
            };
            let inputs = chain
                .upstream
                .iter()
                .filter_map(|&role| {
                    let variable = algebra.context.production_at(role, slot)?;
                    Some(algebra.register(variable, upper_bounds[role]))
                })
                .collect::<Vec<_>>();

            let cap = chain.rule.combine(&mut algebra, &inputs);
            let cap = algebra.finish(cap, downstream_id)?;

            let sum = LinearSum::default().with(1, downstream).with(-1, cap);
            context.post_at_most("production chain", &sum, 0)?;
        }
    }

    context.served = (0..num_slots)
        .map(|slot| {
            LinearSum::of(
                roster
                    .terminal_roles()
                    .filter_map(|role| context.production_at(role, slot)),
            )
        })
        .collect();

    debug!(
        "Defined production for {} roles under {} chains",
        upper_bounds.iter().filter(|&&bound| bound > 0).count(),
        roster.chains().len()
    );
    Ok(())
}

/// Compiles a [`ContributionRule`] into solver variables.
///
/// Every capacity is a fresh variable bounded from above by the described quantity, which is
/// exact for capping a downstream role.
struct SolverAlgebra<'c, 'a> {
    context: &'c mut BuildContext<'a>,
    /// The variable behind every handle and its upper bound.
    capacities: Vec<(DomainId, i32)>,
    foreign_handle: bool,
    error: Option<CompileError>,
}

impl SolverAlgebra<'_, '_> {
    fn register(&mut self, variable: DomainId, upper_bound: i32) -> Capacity {
        self.capacities.push((variable, upper_bound));
        Capacity::new(self.capacities.len() - 1)
    }

    fn resolve(&mut self, capacity: Capacity) -> (DomainId, i32) {
        if let Some(&entry) = self.capacities.get(capacity.index()) {
            entry
        } else {
            self.foreign_handle = true;
            (self.context.new_zero(), 0)
        }
    }

    fn fresh(&mut self, upper_bound: i64) -> (Capacity, DomainId) {
        let upper_bound = match to_solver_int("chain capacity", upper_bound) {
            Ok(bound) => bound,
            Err(error) => {
                self.record(Err(error.into()));
                0
            }
        };
        let variable = self.context.new_variable(0, upper_bound);
        (self.register(variable, upper_bound), variable)
    }

    fn record(&mut self, result: Result<(), CompileError>) {
        if let Err(error) = result {
            let _ = self.error.get_or_insert(error);
        }
    }

    fn finish(self, capacity: Capacity, role: &RoleId) -> Result<DomainId, CompileError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        match self.capacities.get(capacity.index()) {
            Some(&(variable, _)) if !self.foreign_handle => Ok(variable),
            _ => Err(SchedulerError::InvalidCapacityHandle(role.clone()).into()),
        }
    }
}

impl CapacityAlgebra for SolverAlgebra<'_, '_> {
    fn bottleneck(&mut self, capacities: &[Capacity]) -> Capacity {
        let resolved = capacities
            .iter()
            .map(|&capacity| self.resolve(capacity))
            .collect::<Vec<_>>();
        let upper_bound = resolved.iter().map(|&(_, bound)| bound).min().unwrap_or(0);

        let (capacity, variable) = self.fresh(i64::from(upper_bound));
        for (input, _) in resolved {
            let sum = LinearSum::default().with(1, variable).with(-1, input);
            let result = self.context.post_at_most("chain bottleneck", &sum, 0);
            self.record(result);
        }
        capacity
    }

    fn pooled(&mut self, capacities: &[Capacity]) -> Capacity {
        let resolved = capacities
            .iter()
            .map(|&capacity| self.resolve(capacity))
            .collect::<Vec<_>>();
        let upper_bound = resolved
            .iter()
            .map(|&(_, bound)| i64::from(bound))
            .sum::<i64>();

        let (capacity, variable) = self.fresh(upper_bound);
        let mut sum = LinearSum::default().with(1, variable);
        for (input, _) in resolved {
            sum.add(-1, input);
        }
        let result = self.context.post_at_most("chain pool", &sum, 0);
        self.record(result);
        capacity
    }

    fn scaled(&mut self, capacity: Capacity, factor: f64) -> Capacity {
        let (input, input_bound) = self.resolve(capacity);
        let numerator = (factor.max(0.0) * SCALE_DENOMINATOR as f64).round() as i64;
        let upper_bound = i64::from(input_bound) * numerator / SCALE_DENOMINATOR;

        let (scaled, variable) = self.fresh(upper_bound);
        if numerator == 0 {
            return scaled;
        }

        let coefficients = to_solver_int("chain scale factor", numerator)
            .map_err(CompileError::from)
            .and_then(|numerator| {
                let denominator = to_solver_int("chain scale factor", SCALE_DENOMINATOR)?;
                Ok((numerator, denominator))
            });
        let result = coefficients.and_then(|(numerator, denominator)| {
            let sum = LinearSum::default()
                .with(denominator, variable)
                .with(-numerator, input);
            self.context.post_at_most("chain scale", &sum, 0)
        });
        self.record(result);
        scaled
    }
}
