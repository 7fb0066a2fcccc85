//! Create the assignment variables `x(e, g, r)`, and `y(e, d, s, r)` in fixed-shift mode.
use log::debug;

use super::context::BuildContext;
use super::context::LinearSum;
use super::CompileError;

pub(crate) fn run(context: &mut BuildContext) -> Result<(), CompileError> {
    let roster = context.roster;

    context.can_work = (0..roster.num_employees())
        .map(|employee| {
            let has_role = (0..roster.num_roles()).any(|role| roster.is_eligible(employee, role));
            has_role
                && roster.employee(employee).max_consec_slots > 0
                && roster.max_working_slots(employee) > 0
        })
        .collect();

    if roster.input().fixed_shifts {
        define_shift_assignments(context)?;
    } else {
        define_slot_assignments(context);
    }

    debug!(
        "Defined {} slot assignment and {} shift assignment variables",
        context.assignments.len(),
        context.shift_assignments.len()
    );

    Ok(())
}

fn define_slot_assignments(context: &mut BuildContext) {
    let roster = context.roster;
    let num_slots = context.num_slots();

    let mut assignments = Vec::with_capacity(roster.num_employees() * num_slots * roster.num_roles());
    for employee in 0..roster.num_employees() {
        for _ in 0..num_slots {
            for role in 0..roster.num_roles() {
                let variable = if context.can_work[employee] && roster.is_eligible(employee, role) {
                    context.new_boolean()
                } else {
                    context.new_zero()
                };
                assignments.push(variable);
            }
        }
    }

    context.assignments = assignments;
}

/// Every slot variable equals the sum of the shift variables covering it, so overlapping shifts
/// can never both be taken.
fn define_shift_assignments(context: &mut BuildContext) -> Result<(), CompileError> {
    let roster = context.roster;
    let input = roster.input();
    let grid = roster.grid();
    let num_roles = roster.num_roles();
    let shifts = &input.shifts;

    let mut shift_assignments =
        Vec::with_capacity(roster.num_employees() * grid.num_days() as usize * shifts.len() * num_roles);
    for employee in 0..roster.num_employees() {
        let employee_data = roster.employee(employee);
        for _ in 0..grid.num_days() {
            for shift in shifts {
                let fits = shift.length_slots <= employee_data.max_consec_slots
                    && shift.length_slots <= roster.max_working_slots(employee);
                for role in 0..num_roles {
                    let variable = if context.can_work[employee]
                        && fits
                        && roster.is_eligible(employee, role)
                    {
                        context.new_boolean()
                    } else {
                        context.new_zero()
                    };
                    shift_assignments.push(variable);
                }
            }
        }
    }
    context.shift_assignments = shift_assignments;

    let mut assignments = Vec::with_capacity(roster.num_employees() * grid.len() * num_roles);
    for employee in 0..roster.num_employees() {
        for slot_ref in grid.slots() {
            for role in 0..num_roles {
                let covering = shifts
                    .iter()
                    .enumerate()
                    .filter(|(_, shift)| shift.covers(slot_ref.slot))
                    .map(|(shift, _)| {
                        let index = ((employee * grid.num_days() as usize + slot_ref.day as usize)
                            * shifts.len()
                            + shift)
                            * num_roles
                            + role;
                        context.shift_assignments[index]
                    })
                    .collect::<Vec<_>>();

                if covering.is_empty() || !roster.is_eligible(employee, role) {
                    assignments.push(context.new_zero());
                    continue;
                }

                let variable = context.new_boolean();
                let mut link = LinearSum::of(covering);
                link.add(-1, variable);
                context.post_equal("shift coverage", &link, 0)?;
                assignments.push(variable);
            }
        }
    }
    context.assignments = assignments;

    Ok(())
}
