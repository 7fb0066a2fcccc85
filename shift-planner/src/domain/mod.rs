//! The entities a schedule is planned for.
//!
//! All types here are plain data. [`SchedulerInput::validate`] checks the cross references
//! between them and produces a [`RosterIndex`], which the rest of the crate works with.
mod demand;
mod employee;
mod input;
mod production_chain;
mod role;
mod roster;
mod shift;

pub use demand::Demand;
pub use demand::DemandEntry;
pub use employee::Employee;
pub use input::SchedulerInput;
pub use production_chain::ProductionChain;
pub use role::Role;
pub use role::RoleId;
pub use roster::ResolvedChain;
pub use roster::RosterIndex;
pub use shift::Shift;
