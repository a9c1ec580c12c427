pub struct SumLoss;

impl SumLoss {
    /// Total absolute error: sum(|real - expected|)
    pub fn loss(real: &[f64], expected: &[f64]) -> f64 {
        real.iter().zip(expected.iter())
            .map(|(r, e)| (r - e).abs())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn sums_absolute_differences() {
        assert_abs_diff_eq!(SumLoss::loss(&[0.25, -1.0, 3.0], &[0.0, 1.0, 3.0]), 2.25);
    }
}
