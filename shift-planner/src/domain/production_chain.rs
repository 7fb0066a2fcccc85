#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use serde::Serialize;

use super::RoleId;
use crate::chain::ChainRule;

/// States that the output of `downstream` in a slot is capped by the output of the `upstream`
/// roles in the same slot, combined through `rule`.
///
/// For example, a chain from `kitchen` to `service` expresses that service cannot hand out more
/// items than the kitchen prepares.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProductionChain {
    pub upstream: Vec<RoleId>,
    pub downstream: RoleId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rule: ChainRule,
}

impl ProductionChain {
    /// A chain combining the upstream roles with the default bottleneck rule.
    pub fn new<R: Into<RoleId>>(
        upstream: impl IntoIterator<Item = R>,
        downstream: impl Into<RoleId>,
    ) -> ProductionChain {
        ProductionChain {
            upstream: upstream.into_iter().map(Into::into).collect(),
            downstream: downstream.into(),
            rule: ChainRule::default(),
        }
    }

    pub fn with_rule(mut self, rule: ChainRule) -> ProductionChain {
        self.rule = rule;
        self
    }
}
