/// Cross-entropy between network outputs and target distributions.
pub struct CrossEntropyLoss;

impl CrossEntropyLoss {
    /// L = -sum(log(real[i]) * expected[i])
    ///
    /// No epsilon is added: a zero output paired with a non-zero target gives
    /// an infinite cost, and a zero output paired with a zero target gives NaN.
    /// Outputs of a sigmoid layer are strictly inside (0, 1) so neither case
    /// arises there.
    pub fn loss(real: &[f64], expected: &[f64]) -> f64 {
        -real.iter().zip(expected.iter())
            .map(|(r, e)| r.ln() * e)
            .sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn one_hot_target_picks_single_log() {
        let loss = CrossEntropyLoss::loss(&[0.2, 0.5, 0.3], &[0.0, 1.0, 0.0]);
        assert_abs_diff_eq!(loss, -(0.5f64).ln(), epsilon = 1e-12);
    }
}
