//! Add the objective, in minor currency units, to the solver.
//!
//! `sum wage * hours + unmet_penalty * unmet items + preference_penalty * |hours - pref_hours|`,
//! where the preference term only applies to employees who work.
use log::debug;
use pumpkin_solver::variables::DomainId;

use super::context::BuildContext;
use super::context::LinearSum;
use super::units::to_minor_currency;
use super::units::to_solver_int;
use super::CompileError;

pub(crate) fn run(context: &mut BuildContext) -> Result<DomainId, CompileError> {
    let roster = context.roster;
    let slot_len_hour = roster.input().slot_len_hour;
    let weights = context.weights;

    let mut objective = LinearSum::default();
    let mut upper_bound = 0_i64;

    for employee in 0..roster.num_employees() {
        if !context.can_work[employee] {
            continue;
        }

        let wage = to_solver_int(
            "wage per slot",
            to_minor_currency(roster.employee(employee).wage * slot_len_hour),
        )?;
        for slot in 0..context.num_slots() {
            objective.add(wage, context.working_at(employee, slot));
        }
        upper_bound += i64::from(wage) * i64::from(roster.max_working_slots(employee));

        let preference = to_solver_int(
            "preference penalty per slot",
            to_minor_currency(weights.preference_penalty * slot_len_hour),
        )?;
        if preference > 0 {
            let (deviation, deviation_bound) = post_preference_deviation(context, employee)?;
            objective.add(preference, deviation);
            upper_bound += i64::from(preference) * deviation_bound;
        }
    }

    let scale = context.item_scale;
    let unmet_penalty = to_solver_int(
        "unmet demand penalty",
        scale.unmet_penalty(weights.unmet_demand_penalty),
    )?;
    if unmet_penalty > 0 {
        for (slot, &unmet) in context.unmet.iter().enumerate() {
            objective.add(unmet_penalty, unmet);
            upper_bound += i64::from(unmet_penalty) * scale.demand(roster.demand_at(slot));
        }
    }

    if objective.is_empty() {
        debug!("The objective has no terms");
        return Ok(context.new_zero());
    }

    let upper_bound = to_solver_int("objective upper bound", upper_bound)?;
    let objective_variable = context.new_variable(0, upper_bound);
    objective.add(-1, objective_variable);
    context.post_equal("objective", &objective, 0)?;

    debug!(
        "Created an objective of {} terms bounded by {upper_bound}",
        objective.terms().len() - 1
    );
    Ok(objective_variable)
}

/// Define `dev(e) >= |sum_g w(e, g) - pref(e)|` for employees who work, using `used(e)`, which
/// is one whenever the employee works.
fn post_preference_deviation(
    context: &mut BuildContext,
    employee: usize,
) -> Result<(DomainId, i64), CompileError> {
    let roster = context.roster;
    let preferred = (roster.employee(employee).pref_hours / roster.input().slot_len_hour).round();
    let preferred = to_solver_int("preferred slots", preferred as i64)?;
    let cap = to_solver_int("weekly slot cap", i64::from(roster.max_working_slots(employee)))?;

    let used = context.new_boolean();
    let bound = cap.max(preferred);
    let deviation = context.new_variable(0, bound);
    let worked = LinearSum::of((0..context.num_slots()).map(|slot| context.working_at(employee, slot)));

    let mut works_only_when_used = worked.clone();
    works_only_when_used.add(-cap, used);
    context.post_at_most("preference", &works_only_when_used, 0)?;

    let mut above_preference = worked.clone();
    above_preference.add(-1, deviation);
    context.post_at_most("preference", &above_preference, preferred)?;

    let mut below_preference = LinearSum::default().with(preferred, used).with(-1, deviation);
    for &(_, working) in worked.terms() {
        below_preference.add(-1, working);
    }
    context.post_at_most("preference", &below_preference, 0)?;

    Ok((deviation, i64::from(bound)))
}
