//! Define the staffed count `n(r, g)` and enforce `min_present` whenever a role is staffed.
use log::debug;
use pumpkin_solver::variables::DomainId;

use super::context::BuildContext;
use super::context::LinearSum;
use super::units::to_solver_int;
use super::CompileError;

pub(crate) fn run(context: &mut BuildContext) -> Result<(), CompileError> {
    let roster = context.roster;
    let num_slots = context.num_slots();

    let mut staffed = Vec::with_capacity(roster.num_roles() * num_slots);
    for role in 0..roster.num_roles() {
        let candidates = (0..roster.num_employees())
            .filter(|&employee| context.can_work[employee] && roster.is_eligible(employee, role))
            .collect::<Vec<_>>();
        let upper_bound = to_solver_int("staff count", candidates.len() as i64)?;
        let min_present = to_solver_int("min_present", i64::from(roster.role(role).min_present))?;

        for slot in 0..num_slots {
            if candidates.is_empty() {
                staffed.push(context.new_zero());
                continue;
            }

            let count = context.new_variable(0, upper_bound);
            let mut sum = LinearSum::of(
                candidates
                    .iter()
                    .map(|&employee| context.assignment(employee, slot, role)),
            );
            sum.add(-1, count);
            context.post_equal("staff count", &sum, 0)?;

            if min_present >= 2 {
                post_activity_gate(context, count, upper_bound, min_present)?;
            }
            staffed.push(count);
        }
    }
    context.staffed = staffed;

    debug!("Defined {} staffed count variables", context.staffed.len());
    Ok(())
}

/// `n > 0` implies `n >= min_present`, through an activity variable `a`:
/// `n <= E * a` and `min_present * a <= n`.
fn post_activity_gate(
    context: &mut BuildContext,
    count: DomainId,
    upper_bound: i32,
    min_present: i32,
) -> Result<(), CompileError> {
    let active = context.new_boolean();

    let staffed_only_when_active = LinearSum::default()
        .with(1, count)
        .with(-upper_bound, active);
    context.post_at_most("minimum presence", &staffed_only_when_active, 0)?;

    let active_needs_minimum = LinearSum::default()
        .with(min_present, active)
        .with(-1, count);
    context.post_at_most("minimum presence", &active_needs_minimum, 0)
}
