//! Define `w(e, g) = sum_r x(e, g, r)`.
//!
//! `w` is a 0..1 variable, so the sum is the disjunction of the role variables and an employee
//! fills at most one role per slot.
use log::debug;

use super::context::BuildContext;
use super::context::LinearSum;
use super::CompileError;

pub(crate) fn run(context: &mut BuildContext) -> Result<(), CompileError> {
    let roster = context.roster;
    let num_slots = context.num_slots();

    let mut working = Vec::with_capacity(roster.num_employees() * num_slots);
    for employee in 0..roster.num_employees() {
        for slot in 0..num_slots {
            if !context.can_work[employee] {
                working.push(context.new_zero());
                continue;
            }

            let variable = context.new_boolean();
            let mut sum = LinearSum::of(
                (0..roster.num_roles())
                    .filter(|&role| roster.is_eligible(employee, role))
                    .map(|role| context.assignment(employee, slot, role)),
            );
            sum.add(-1, variable);
            context.post_equal("working", &sum, 0)?;
            working.push(variable);
        }
    }
    context.working = working;

    debug!("Linked {} working variables", context.working.len());
    Ok(())
}
