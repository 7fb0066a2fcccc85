use super::Capacity;
use super::CapacityAlgebra;
use super::ContributionRule;

/// A [`CapacityAlgebra`] over plain numbers.
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    values: Vec<f64>,
}

impl Evaluation {
    /// Register a known capacity.
    pub fn input(&mut self, value: f64) -> Capacity {
        self.push(value.max(0.0))
    }

    /// The value behind a handle, if the handle belongs to this evaluation.
    pub fn value(&self, capacity: Capacity) -> Option<f64> {
        self.values.get(capacity.index()).copied()
    }

    fn push(&mut self, value: f64) -> Capacity {
        self.values.push(value);
        Capacity::new(self.values.len() - 1)
    }

    fn get(&self, capacity: Capacity) -> f64 {
        self.value(capacity).unwrap_or(0.0)
    }
}

impl CapacityAlgebra for Evaluation {
    fn bottleneck(&mut self, capacities: &[Capacity]) -> Capacity {
        let value = capacities
            .iter()
            .map(|&capacity| self.get(capacity))
            .reduce(f64::min)
            .unwrap_or(0.0);
        self.push(value)
    }

    fn pooled(&mut self, capacities: &[Capacity]) -> Capacity {
        let value = capacities.iter().map(|&capacity| self.get(capacity)).sum();
        self.push(value)
    }

    fn scaled(&mut self, capacity: Capacity, factor: f64) -> Capacity {
        let value = self.get(capacity) * factor.max(0.0);
        self.push(value)
    }
}

/// Apply a rule to known upstream outputs.
///
/// Returns `None` if the rule hands back a capacity it was not given.
pub fn evaluate(rule: &dyn ContributionRule, upstream_outputs: &[f64]) -> Option<f64> {
    let mut evaluation = Evaluation::default();
    let inputs = upstream_outputs
        .iter()
        .map(|&value| evaluation.input(value))
        .collect::<Vec<_>>();

    let result = rule.combine(&mut evaluation, &inputs);
    evaluation.value(result)
}
