//! Post the per-employee labour rules over the working variables.
//!
//! Consecutive work, minimum block length and rest periods are constrained within a day; the
//! overnight gap separates days.
use log::debug;
use pumpkin_solver::variables::DomainId;

use super::context::BuildContext;
use super::context::LinearSum;
use super::units::to_solver_int;
use super::CompileError;

pub(crate) fn run(context: &mut BuildContext) -> Result<(), CompileError> {
    let roster = context.roster;
    let before = context.num_constraints();

    for employee in 0..roster.num_employees() {
        if !context.can_work[employee] {
            continue;
        }

        post_hour_cap(context, employee)?;

        for day in 0..roster.grid().num_days() {
            let day_slots = roster.grid().day_indices(day);
            let working = day_slots
                .map(|slot| context.working_at(employee, slot))
                .collect::<Vec<_>>();

            post_consecutive_limit(context, employee, &working)?;
            post_minimum_length(context, &working)?;
            post_rest(context, &working)?;
        }
    }

    debug!(
        "Posted {} labour rule constraints",
        context.num_constraints() - before
    );
    Ok(())
}

fn post_hour_cap(context: &mut BuildContext, employee: usize) -> Result<(), CompileError> {
    let num_slots = context.num_slots();
    let cap = context.roster.max_working_slots(employee) as usize;
    if cap >= num_slots {
        return Ok(());
    }

    let sum = LinearSum::of((0..num_slots).map(|slot| context.working_at(employee, slot)));
    let rhs = to_solver_int("weekly slot cap", cap as i64)?;
    context.post_at_most("weekly hours", &sum, rhs)
}

/// Every window of `max_consec_slots + 1` slots contains an idle slot.
fn post_consecutive_limit(
    context: &mut BuildContext,
    employee: usize,
    working: &[DomainId],
) -> Result<(), CompileError> {
    let limit = context.roster.employee(employee).max_consec_slots as usize;
    if limit >= working.len() {
        return Ok(());
    }

    let rhs = to_solver_int("consecutive slot limit", limit as i64)?;
    for window in working.windows(limit + 1) {
        context.post_at_most("consecutive slots", &LinearSum::of(window.iter().copied()), rhs)?;
    }
    Ok(())
}

/// A block starting at `t` covers `t..t + L`; a block cannot start where it would run past the
/// end of the day.
fn post_minimum_length(
    context: &mut BuildContext,
    working: &[DomainId],
) -> Result<(), CompileError> {
    let length = context.roster.input().min_shift_length_slots as usize;
    if length <= 1 {
        return Ok(());
    }

    for start in 0..working.len() {
        let block_start = {
            let sum = LinearSum::default().with(1, working[start]);
            if start > 0 {
                sum.with(-1, working[start - 1])
            } else {
                sum
            }
        };

        if start + length > working.len() {
            context.post_at_most("minimum shift length", &block_start, 0)?;
            continue;
        }

        for offset in 1..length {
            let sum = block_start.clone().with(-1, working[start + offset]);
            context.post_at_most("minimum shift length", &sum, 0)?;
        }
    }
    Ok(())
}

/// After a block ends at `t`, the slots `t + 1..=t + R` are idle.
fn post_rest(
    context: &mut BuildContext,
    working: &[DomainId],
) -> Result<(), CompileError> {
    let rest = context.roster.input().min_rest_slots as usize;
    if rest <= 1 {
        // The slot following a block is idle by definition.
        return Ok(());
    }

    for end in 0..working.len() {
        for offset in 2..=rest {
            if end + offset >= working.len() {
                break;
            }
            let sum = LinearSum::default()
                .with(1, working[end])
                .with(-1, working[end + 1])
                .with(1, working[end + offset]);
            context.post_at_most("rest", &sum, 1)?;
        }
    }
    Ok(())
}
