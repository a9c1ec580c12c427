use std::fmt;
use std::sync::Arc;

use crate::loss::{cross_entropy::CrossEntropyLoss, mse::MseLoss, sum::SumLoss};

type CostFn = Arc<dyn Fn(&[f64], &[f64]) -> f64 + Send + Sync>;

/// Scores network outputs against labels on the validation set.
///
/// Only used to decide when training stops; the gradient always comes from
/// the activation derivative applied to `label - output`.
///
/// - `Sum`          : sum of absolute differences
/// - `MeanSquared`  : sum of squared differences over `2·n`
/// - `CrossEntropy` : `-sum(log(real) · expected)`
/// - `Custom`       : any caller-supplied `(real, expected) -> f64`
#[derive(Clone)]
pub enum CostFunction {
    Sum,
    MeanSquared,
    CrossEntropy,
    Custom(CostFn),
}

impl CostFunction {
    pub fn custom<F>(cost: F) -> CostFunction
    where
        F: Fn(&[f64], &[f64]) -> f64 + Send + Sync + 'static,
    {
        CostFunction::Custom(Arc::new(cost))
    }

    /// `real` and `expected` must have the same length.
    pub fn cost(&self, real: &[f64], expected: &[f64]) -> f64 {
        debug_assert_eq!(real.len(), expected.len());
        match self {
            CostFunction::Sum => SumLoss::loss(real, expected),
            CostFunction::MeanSquared => MseLoss::loss(real, expected),
            CostFunction::CrossEntropy => CrossEntropyLoss::loss(real, expected),
            CostFunction::Custom(cost) => cost(real, expected),
        }
    }
}

impl fmt::Debug for CostFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostFunction::Sum => f.write_str("Sum"),
            CostFunction::MeanSquared => f.write_str("MeanSquared"),
            CostFunction::CrossEntropy => f.write_str("CrossEntropy"),
            CostFunction::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn dispatches_to_each_variant() {
        let real = [0.5, 0.25];
        let expected = [1.0, 0.0];
        assert_abs_diff_eq!(CostFunction::Sum.cost(&real, &expected), 0.75);
        assert_abs_diff_eq!(CostFunction::MeanSquared.cost(&real, &expected), 0.078125);
        assert_abs_diff_eq!(
            CostFunction::CrossEntropy.cost(&real, &expected),
            -(0.5f64).ln(),
            epsilon = 1e-12
        );
        let max_err = CostFunction::custom(|r, e| {
            r.iter().zip(e).map(|(a, b)| (a - b).abs()).fold(0.0, f64::max)
        });
        assert_abs_diff_eq!(max_err.cost(&real, &expected), 0.5);
    }
}
