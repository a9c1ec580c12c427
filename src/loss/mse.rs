pub struct MseLoss;

impl MseLoss {
    /// Half mean-squared error: sum((real - expected)²) / (2·n)
    pub fn loss(real: &[f64], expected: &[f64]) -> f64 {
        let n = real.len() as f64;
        real.iter().zip(expected.iter())
            .map(|(r, e)| (r - e).powi(2))
            .sum::<f64>() / (2.0 * n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn halves_the_mean() {
        // (0.5² + 1²) / (2·2)
        assert_abs_diff_eq!(MseLoss::loss(&[0.5, 2.0], &[0.0, 1.0]), 0.3125);
    }
}
