use super::Capacity;
use super::CapacityAlgebra;
use super::ChainRule;
use super::ContributionRule;

impl ContributionRule for ChainRule {
    fn combine(&self, algebra: &mut dyn CapacityAlgebra, upstream_outputs: &[Capacity]) -> Capacity {
        match self {
            ChainRule::Bottleneck => algebra.bottleneck(upstream_outputs),
            ChainRule::Pooled => algebra.pooled(upstream_outputs),
            ChainRule::Scaled { factor } => {
                let bottleneck = algebra.bottleneck(upstream_outputs);
                algebra.scaled(bottleneck, *factor)
            }
            ChainRule::Custom(rule) => rule.combine(algebra, upstream_outputs),
        }
    }

    fn upstream_share(&self, downstream_share: f64, num_upstream: usize) -> f64 {
        match self {
            ChainRule::Bottleneck => downstream_share,
            ChainRule::Pooled => downstream_share / num_upstream.max(1) as f64,
            ChainRule::Scaled { factor } => downstream_share / factor,
            ChainRule::Custom(rule) => rule.upstream_share(downstream_share, num_upstream),
        }
    }
}
