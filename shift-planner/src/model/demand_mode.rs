//! The two ways demand is coupled to production.
//!
//! Exactly one [`DemandPolicy`] is selected per build; no other pass looks at
//! `meet_all_demand`.
use log::debug;

use super::context::BuildContext;
use super::context::LinearSum;
use super::units::to_solver_int;
use super::CompileError;

pub(crate) trait DemandPolicy {
    fn name(&self) -> &'static str;

    /// Post the coupling between the served output of every slot and its demand.
    fn couple(&self, context: &mut BuildContext) -> Result<(), CompileError>;
}

/// Every slot is served in full, and every role with a minimum presence is staffed to it in
/// slots with positive demand.
#[derive(Clone, Copy, Debug)]
pub(crate) struct HardDemand;

/// Shortfalls are allowed and recorded in `u(g) >= demand(g) - served(g)`, with
/// `0 <= u(g) <= demand(g)`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SoftDemand;

impl DemandPolicy for HardDemand {
    fn name(&self) -> &'static str {
        "hard"
    }

    fn couple(&self, context: &mut BuildContext) -> Result<(), CompileError> {
        let roster = context.roster;
        let scale = context.item_scale;

        for slot in 0..context.num_slots() {
            let demand = to_solver_int("slot demand", scale.demand(roster.demand_at(slot)))?;
            if demand == 0 {
                continue;
            }

            let served = context.served[slot].clone();
            context.post_at_least("demand", &served, demand)?;

            for role in 0..roster.num_roles() {
                let min_present = roster.role(role).min_present;
                if min_present == 0 {
                    continue;
                }
                let min_present = to_solver_int("min_present", i64::from(min_present))?;
                let staffed = LinearSum::default().with(1, context.staffed_at(role, slot));
                context.post_at_least("required presence", &staffed, min_present)?;
            }
        }

        Ok(())
    }
}

impl DemandPolicy for SoftDemand {
    fn name(&self) -> &'static str {
        "soft"
    }

    fn couple(&self, context: &mut BuildContext) -> Result<(), CompileError> {
        let roster = context.roster;
        let scale = context.item_scale;

        let mut unmet = Vec::with_capacity(context.num_slots());
        for slot in 0..context.num_slots() {
            let demand = to_solver_int("slot demand", scale.demand(roster.demand_at(slot)))?;
            if demand == 0 {
                unmet.push(context.new_zero());
                continue;
            }

            let shortfall = context.new_variable(0, demand);
            let mut covered = context.served[slot].clone();
            covered.add(1, shortfall);
            context.post_at_least("unmet demand", &covered, demand)?;
            unmet.push(shortfall);
        }
        context.unmet = unmet;

        debug!("Defined {} unmet demand variables", context.unmet.len());
        Ok(())
    }
}

pub(crate) fn select(meet_all_demand: bool) -> &'static dyn DemandPolicy {
    if meet_all_demand {
        &HardDemand
    } else {
        &SoftDemand
    }
}
