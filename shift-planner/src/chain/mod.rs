//! Contribution rules: how the output of upstream roles caps the output of a downstream role.
//!
//! A rule never sees numbers directly. It combines opaque [`Capacity`] handles through a
//! [`CapacityAlgebra`], so one rule definition is used both when posting solver constraints and
//! when estimating capacities for the insights report.
mod evaluate;
mod rules;

use std::fmt::Debug;
use std::sync::Arc;

pub use evaluate::evaluate;
pub use evaluate::Evaluation;
#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use serde::Serialize;

/// A handle to a capacity owned by a [`CapacityAlgebra`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity(usize);

impl Capacity {
    pub(crate) fn new(index: usize) -> Capacity {
        Capacity(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// The operations available to a [`ContributionRule`].
///
/// Every operation returns a new handle whose capacity is at most the described quantity.
pub trait CapacityAlgebra {
    /// The smallest of the capacities; zero for an empty slice.
    fn bottleneck(&mut self, capacities: &[Capacity]) -> Capacity;
    /// The sum of the capacities.
    fn pooled(&mut self, capacities: &[Capacity]) -> Capacity;
    /// The capacity multiplied by a non-negative factor.
    fn scaled(&mut self, capacity: Capacity, factor: f64) -> Capacity;
}

/// A strategy deciding how upstream output caps a downstream role.
pub trait ContributionRule: Debug + Send + Sync {
    /// Combine the outputs of the upstream roles in one slot into the cap of the downstream
    /// role in that slot.
    ///
    /// The returned handle must come from `upstream_outputs` or from `algebra`.
    fn combine(&self, algebra: &mut dyn CapacityAlgebra, upstream_outputs: &[Capacity]) -> Capacity;

    /// The fraction of the demand each upstream role has to produce for the downstream role to
    /// produce `downstream_share` of it.
    fn upstream_share(&self, downstream_share: f64, num_upstream: usize) -> f64 {
        let _ = num_upstream;
        downstream_share
    }
}

/// The contribution rule of a [`ProductionChain`](crate::domain::ProductionChain).
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChainRule {
    /// The downstream role is capped by its slowest upstream role.
    #[default]
    Bottleneck,
    /// The downstream role is capped by the combined output of its upstream roles.
    Pooled,
    /// Every upstream item supports `factor` downstream items; capped by the slowest upstream
    /// role.
    Scaled { factor: f64 },
    /// A user-supplied rule. Not serialisable.
    #[cfg_attr(feature = "serde", serde(skip))]
    Custom(Arc<dyn ContributionRule>),
}

impl ChainRule {
    pub fn custom(rule: impl ContributionRule + 'static) -> ChainRule {
        ChainRule::Custom(Arc::new(rule))
    }
}
