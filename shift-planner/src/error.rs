use thiserror::Error;

use crate::domain::RoleId;
use crate::driver::SolvePhase;

pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Errors raised when a [`SchedulerInput`](crate::domain::SchedulerInput) is malformed.
///
/// These are detected before any solver variable is created; a malformed input is never silently
/// repaired.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    #[error("slot length must be a positive number of hours, got {0}")]
    InvalidSlotLength(f64),

    #[error("demand is missing for day {day}, slot {slot}")]
    MissingDemand { day: u32, slot: u32 },

    #[error("demand is given more than once for day {day}, slot {slot}")]
    DuplicateDemand { day: u32, slot: u32 },

    #[error(
        "demand is given for day {day}, slot {slot}, outside the {num_days}x{slots_per_day} \
         planning grid"
    )]
    DemandOutOfRange {
        day: u32,
        slot: u32,
        num_days: u32,
        slots_per_day: u32,
    },

    #[error("demand for day {day}, slot {slot} must be a non-negative number, got {quantity}")]
    InvalidDemand { day: u32, slot: u32, quantity: f64 },

    #[error("role '{0}' is defined more than once")]
    DuplicateRole(RoleId),

    #[error("employee '{0}' is defined more than once")]
    DuplicateEmployee(String),

    #[error("shift '{0}' is defined more than once")]
    DuplicateShift(String),

    #[error("role '{role}' has an invalid {field}: {value}")]
    InvalidRoleValue {
        role: RoleId,
        field: &'static str,
        value: f64,
    },

    #[error("employee '{employee}' has an invalid {field}: {value}")]
    InvalidEmployeeValue {
        employee: String,
        field: &'static str,
        value: f64,
    },

    #[error("employee '{employee}' is eligible for unknown role '{role}'")]
    UnknownEligibleRole { employee: String, role: RoleId },

    #[error("production chain references unknown role '{0}'")]
    UnknownChainRole(RoleId),

    #[error("production chain into '{0}' has no upstream roles")]
    EmptyChain(RoleId),

    #[error("role '{0}' takes part in a production chain but does not produce anything")]
    NonProducingChainRole(RoleId),

    #[error("role '{0}' is marked independent but is fed by a production chain")]
    IndependentRoleFed(RoleId),

    #[error("production chains form a cycle through role '{0}'")]
    ChainCycle(RoleId),

    #[error("production chain into '{role}' has an invalid scale factor {factor}")]
    InvalidChainFactor { role: RoleId, factor: f64 },

    #[error("shift '{shift}' covers slots {start}..{end} but a day only has {slots_per_day} slots")]
    ShiftOutOfRange {
        shift: String,
        start: u32,
        end: u32,
        slots_per_day: u32,
    },

    #[error("shift '{0}' has zero length")]
    EmptyShift(String),

    #[error("fixed-shift mode requires at least one shift template")]
    MissingShiftTemplates,
}

/// The error type of every public scheduling operation.
///
/// Business outcomes such as an infeasible roster are not errors; they are reported through
/// [`SolveStatus`](crate::driver::SolveStatus) and the insights report.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("invalid scheduler input: {0}")]
    Construction(#[from] ConstructionError),

    #[error("time limit must be a finite, non-negative number of seconds, got {0}")]
    InvalidTimeLimit(f64),

    #[error("option '{name}' must be a finite, non-negative number, got {value}")]
    InvalidOption { name: &'static str, value: f64 },

    #[error("{quantity} ({value}) does not fit in the solver's integer range")]
    NumericOverflow { quantity: &'static str, value: i64 },

    #[error("the contribution rule into role '{0}' returned a capacity it was not given")]
    InvalidCapacityHandle(RoleId),

    #[error("a solve cannot move from {from} to {to}")]
    InvalidTransition { from: SolvePhase, to: SolvePhase },
}
