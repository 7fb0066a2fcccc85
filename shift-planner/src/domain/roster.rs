use std::collections::VecDeque;

use fnv::FnvHashMap;
use fnv::FnvHashSet;
use log::warn;

use super::Employee;
use super::Role;
use super::RoleId;
use super::SchedulerInput;
use crate::chain::ChainRule;
use crate::chain::ContributionRule;
use crate::error::ConstructionError;
use crate::grid::Grid;

/// Tolerance used when converting hours to a whole number of slots.
const SLOT_EPSILON: f64 = 1e-9;

/// A validated [`SchedulerInput`] with its cross references resolved to positions.
///
/// Roles and employees are identified by their position in `input.roles` and `input.employees`.
#[derive(Debug)]
pub struct RosterIndex<'a> {
    input: &'a SchedulerInput,
    grid: Grid,
    role_positions: FnvHashMap<&'a RoleId, usize>,
    /// `eligibility[employee][role]`.
    eligibility: Vec<Vec<bool>>,
    eligible_counts: Vec<usize>,
    chains: Vec<ResolvedChain<'a>>,
    feeds_chain: Vec<bool>,
    /// The roles ordered such that every upstream role precedes its downstream roles.
    topological_order: Vec<usize>,
    /// The fraction of the total demand each role has to produce.
    requirement_shares: Vec<f64>,
    /// The demand per slot, indexed by the flat grid index.
    demand: Vec<f64>,
}

/// A production chain with its roles resolved to positions.
#[derive(Debug, Clone)]
pub struct ResolvedChain<'a> {
    pub upstream: Vec<usize>,
    pub downstream: usize,
    pub rule: &'a ChainRule,
}

impl<'a> RosterIndex<'a> {
    pub(crate) fn build(input: &'a SchedulerInput) -> Result<RosterIndex<'a>, ConstructionError> {
        if !input.slot_len_hour.is_finite() || input.slot_len_hour <= 0.0 {
            return Err(ConstructionError::InvalidSlotLength(input.slot_len_hour));
        }

        let grid = Grid::new(input.num_days, input.num_slots_per_day);
        let role_positions = index_roles(&input.roles)?;
        let eligibility = index_employees(&input.employees, &input.roles, &role_positions)?;
        check_shifts(input)?;
        let chains = resolve_chains(input, &role_positions)?;
        let topological_order = order_roles(&input.roles, &chains)?;
        let demand = collect_demand(input, grid)?;

        let eligible_counts = (0..input.roles.len())
            .map(|role| eligibility.iter().filter(|row| row[role]).count())
            .collect::<Vec<_>>();

        let mut feeds_chain = vec![false; input.roles.len()];
        let mut fed_by_chain = vec![false; input.roles.len()];
        for chain in &chains {
            for &upstream in &chain.upstream {
                feeds_chain[upstream] = true;
            }
            fed_by_chain[chain.downstream] = true;
        }

        for (role, fed) in input.roles.iter().zip(&fed_by_chain) {
            if !role.is_independent && !fed {
                warn!(
                    "Role '{}' is marked dependent but no production chain feeds it; treating it as independent",
                    role.id
                );
            }
        }
        for employee in &input.employees {
            if employee.role_eligibility.is_empty() {
                warn!(
                    "Employee '{}' is not eligible for any role and will not be scheduled",
                    employee.id
                );
            }
        }

        let requirement_shares =
            compute_requirement_shares(&input.roles, &chains, &feeds_chain, &topological_order);

        Ok(RosterIndex {
            input,
            grid,
            role_positions,
            eligibility,
            eligible_counts,
            chains,
            feeds_chain,
            topological_order,
            requirement_shares,
            demand,
        })
    }

    pub fn input(&self) -> &'a SchedulerInput {
        self.input
    }

    pub(crate) fn grid(&self) -> Grid {
        self.grid
    }

    pub fn num_roles(&self) -> usize {
        self.input.roles.len()
    }

    pub fn num_employees(&self) -> usize {
        self.input.employees.len()
    }

    pub fn num_slots(&self) -> usize {
        self.grid.len()
    }

    pub fn role(&self, role: usize) -> &'a Role {
        &self.input.roles[role]
    }

    pub fn employee(&self, employee: usize) -> &'a Employee {
        &self.input.employees[employee]
    }

    pub fn role_position(&self, id: &RoleId) -> Option<usize> {
        self.role_positions.get(id).copied()
    }

    pub fn is_eligible(&self, employee: usize, role: usize) -> bool {
        self.eligibility[employee][role]
    }

    pub fn eligible_count(&self, role: usize) -> usize {
        self.eligible_counts[role]
    }

    pub fn chains(&self) -> &[ResolvedChain<'a>] {
        &self.chains
    }

    /// Roles in an order where every chain's upstream roles come before its downstream role.
    pub fn topological_order(&self) -> &[usize] {
        &self.topological_order
    }

    /// Whether the output of the role is served to customers, i.e. it produces and feeds no
    /// chain.
    pub fn is_terminal(&self, role: usize) -> bool {
        self.input.roles[role].producing && !self.feeds_chain[role]
    }

    pub fn terminal_roles(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.num_roles()).filter(|&role| self.is_terminal(role))
    }

    /// The fraction of the demand of every slot the role has to produce for the demand to be
    /// served.
    pub fn requirement_share(&self, role: usize) -> f64 {
        self.requirement_shares[role]
    }

    /// The demand of a slot by its flat grid index.
    pub fn demand_at(&self, slot_index: usize) -> f64 {
        self.demand[slot_index]
    }

    pub fn demand_per_slot(&self) -> &[f64] {
        &self.demand
    }

    pub fn total_demand(&self) -> f64 {
        self.demand.iter().sum()
    }

    /// The number of slots in which an employee can work without exceeding the weekly hours,
    /// capped by the length of the horizon.
    pub fn max_working_slots(&self, employee: usize) -> u32 {
        let max_hours = self.input.employees[employee].max_hours_per_week;
        let slots = (max_hours / self.input.slot_len_hour + SLOT_EPSILON).floor();
        let horizon = self.grid.len() as f64;
        slots.min(horizon) as u32
    }
}

fn index_roles(roles: &[Role]) -> Result<FnvHashMap<&RoleId, usize>, ConstructionError> {
    let mut positions = FnvHashMap::default();
    for (position, role) in roles.iter().enumerate() {
        if !role.items_per_hour.is_finite() || role.items_per_hour < 0.0 {
            return Err(ConstructionError::InvalidRoleValue {
                role: role.id.clone(),
                field: "items_per_hour",
                value: role.items_per_hour,
            });
        }
        if positions.insert(&role.id, position).is_some() {
            return Err(ConstructionError::DuplicateRole(role.id.clone()));
        }
    }
    Ok(positions)
}

fn index_employees(
    employees: &[Employee],
    roles: &[Role],
    role_positions: &FnvHashMap<&RoleId, usize>,
) -> Result<Vec<Vec<bool>>, ConstructionError> {
    let mut seen = FnvHashSet::default();
    let mut eligibility = Vec::with_capacity(employees.len());

    for employee in employees {
        if !seen.insert(employee.id.as_str()) {
            return Err(ConstructionError::DuplicateEmployee(employee.id.clone()));
        }

        for (field, value) in [
            ("wage", employee.wage),
            ("max_hours_per_week", employee.max_hours_per_week),
            ("pref_hours", employee.pref_hours),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConstructionError::InvalidEmployeeValue {
                    employee: employee.id.clone(),
                    field,
                    value,
                });
            }
        }

        let mut row = vec![false; roles.len()];
        for role in &employee.role_eligibility {
            let position = role_positions.get(role).copied().ok_or_else(|| {
                ConstructionError::UnknownEligibleRole {
                    employee: employee.id.clone(),
                    role: role.clone(),
                }
            })?;
            row[position] = true;
        }
        eligibility.push(row);
    }

    Ok(eligibility)
}

fn check_shifts(input: &SchedulerInput) -> Result<(), ConstructionError> {
    let mut seen = FnvHashSet::default();
    for shift in &input.shifts {
        if !seen.insert(shift.id.as_str()) {
            return Err(ConstructionError::DuplicateShift(shift.id.clone()));
        }
        if shift.length_slots == 0 {
            return Err(ConstructionError::EmptyShift(shift.id.clone()));
        }
        if shift.end_slot() > input.num_slots_per_day {
            return Err(ConstructionError::ShiftOutOfRange {
                shift: shift.id.clone(),
                start: shift.start_slot,
                end: shift.end_slot(),
                slots_per_day: input.num_slots_per_day,
            });
        }
    }

    if input.fixed_shifts && input.shifts.is_empty() {
        return Err(ConstructionError::MissingShiftTemplates);
    }

    Ok(())
}

fn resolve_chains<'a>(
    input: &'a SchedulerInput,
    role_positions: &FnvHashMap<&'a RoleId, usize>,
) -> Result<Vec<ResolvedChain<'a>>, ConstructionError> {
    let resolve = |id: &RoleId| -> Result<usize, ConstructionError> {
        let position = role_positions
            .get(id)
            .copied()
            .ok_or_else(|| ConstructionError::UnknownChainRole(id.clone()))?;
        if !input.roles[position].producing {
            return Err(ConstructionError::NonProducingChainRole(id.clone()));
        }
        Ok(position)
    };

    input
        .chains
        .iter()
        .map(|chain| {
            if chain.upstream.is_empty() {
                return Err(ConstructionError::EmptyChain(chain.downstream.clone()));
            }

            let downstream = resolve(&chain.downstream)?;
            if input.roles[downstream].is_independent {
                return Err(ConstructionError::IndependentRoleFed(
                    chain.downstream.clone(),
                ));
            }

            if let ChainRule::Scaled { factor } = chain.rule {
                if !factor.is_finite() || factor <= 0.0 {
                    return Err(ConstructionError::InvalidChainFactor {
                        role: chain.downstream.clone(),
                        factor,
                    });
                }
            }

            let upstream = chain
                .upstream
                .iter()
                .map(resolve)
                .collect::<Result<Vec<_>, _>>()?;

            Ok(ResolvedChain {
                upstream,
                downstream,
                rule: &chain.rule,
            })
        })
        .collect()
}

/// Order the roles with Kahn's algorithm; roles left over sit on a cycle.
fn order_roles(roles: &[Role], chains: &[ResolvedChain<'_>]) -> Result<Vec<usize>, ConstructionError> {
    let mut successors = vec![Vec::new(); roles.len()];
    let mut in_degree = vec![0_usize; roles.len()];
    for chain in chains {
        for &upstream in &chain.upstream {
            successors[upstream].push(chain.downstream);
            in_degree[chain.downstream] += 1;
        }
    }

    let mut queue = (0..roles.len())
        .filter(|&role| in_degree[role] == 0)
        .collect::<VecDeque<_>>();
    let mut order = Vec::with_capacity(roles.len());

    while let Some(role) = queue.pop_front() {
        order.push(role);
        for &successor in &successors[role] {
            in_degree[successor] -= 1;
            if in_degree[successor] == 0 {
                queue.push_back(successor);
            }
        }
    }

    if let Some(role) = (0..roles.len()).find(|&role| in_degree[role] > 0) {
        return Err(ConstructionError::ChainCycle(roles[role].id.clone()));
    }

    Ok(order)
}

fn collect_demand(input: &SchedulerInput, grid: Grid) -> Result<Vec<f64>, ConstructionError> {
    let mut demand = vec![None; grid.len()];

    for entry in input.demand.iter() {
        if !grid.contains(entry.day, entry.slot) {
            return Err(ConstructionError::DemandOutOfRange {
                day: entry.day,
                slot: entry.slot,
                num_days: grid.num_days(),
                slots_per_day: grid.slots_per_day(),
            });
        }
        if !entry.quantity.is_finite() || entry.quantity < 0.0 {
            return Err(ConstructionError::InvalidDemand {
                day: entry.day,
                slot: entry.slot,
                quantity: entry.quantity,
            });
        }
        demand[grid.index(entry.day, entry.slot)] = Some(entry.quantity);
    }

    demand
        .into_iter()
        .enumerate()
        .map(|(index, quantity)| {
            quantity.ok_or_else(|| {
                let slot_ref = grid.slot_ref(index);
                ConstructionError::MissingDemand {
                    day: slot_ref.day,
                    slot: slot_ref.slot,
                }
            })
        })
        .collect()
}

/// Terminal roles share the served demand evenly; each chain passes the requirement of its
/// downstream role on to its upstream roles through its rule.
fn compute_requirement_shares(
    roles: &[Role],
    chains: &[ResolvedChain<'_>],
    feeds_chain: &[bool],
    topological_order: &[usize],
) -> Vec<f64> {
    let is_terminal = |role: usize| roles[role].producing && !feeds_chain[role];
    let num_terminal = (0..roles.len()).filter(|&role| is_terminal(role)).count();

    let mut shares = (0..roles.len())
        .map(|role| {
            if is_terminal(role) {
                1.0 / num_terminal as f64
            } else {
                0.0
            }
        })
        .collect::<Vec<_>>();

    for &role in topological_order.iter().rev() {
        for chain in chains.iter().filter(|chain| chain.downstream == role) {
            let upstream_share = chain.rule.upstream_share(shares[role], chain.upstream.len());
            for &upstream in &chain.upstream {
                shares[upstream] = shares[upstream].max(upstream_share);
            }
        }
    }

    shares
}
