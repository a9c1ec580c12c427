use crate::error::Result;
use crate::network::configuration::{check_rate, Configuration};

/// Online gradient descent with momentum.
///
/// Holds the learning rate and momentum factor together with the combined
/// step size `mf_lr = (1 - momentum_factor) * learning_rate`, which is
/// recomputed on every assignment so it never lags behind either rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Momentum {
    learning_rate: f64,
    momentum_factor: f64,
    mf_lr: f64,
}

/// Per-weight operands of one update, addressed through precomputed index
/// tables so the update loop performs no division.
pub struct UpdateTerms<'a> {
    /// Error of the unit each weight feeds into.
    pub errors: &'a [f64],
    /// Added to every error index (1 skips a bias slot in `errors`).
    pub error_offset: usize,
    /// Activation of the node each weight reads from.
    pub activations: &'a [f64],
    pub error_indices: &'a [usize],
    pub activation_indices: &'a [usize],
}

impl Momentum {
    pub fn new(learning_rate: f64, momentum_factor: f64) -> Result<Momentum> {
        check_rate("learning rate", learning_rate)?;
        check_rate("momentum factor", momentum_factor)?;
        Ok(Momentum {
            learning_rate,
            momentum_factor,
            mf_lr: (1.0 - momentum_factor) * learning_rate,
        })
    }

    /// Rates of a `Configuration` are already known to be valid.
    pub(crate) fn from_configuration(configuration: &Configuration) -> Momentum {
        let learning_rate = configuration.learning_rate();
        let momentum_factor = configuration.momentum_factor();
        Momentum {
            learning_rate,
            momentum_factor,
            mf_lr: (1.0 - momentum_factor) * learning_rate,
        }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn momentum_factor(&self) -> f64 {
        self.momentum_factor
    }

    pub fn mf_lr(&self) -> f64 {
        self.mf_lr
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<()> {
        *self = Momentum::new(learning_rate, self.momentum_factor)?;
        Ok(())
    }

    pub fn set_momentum_factor(&mut self, momentum_factor: f64) -> Result<()> {
        *self = Momentum::new(self.learning_rate, momentum_factor)?;
        Ok(())
    }

    /// Computes every new weight from the current and previous weights into
    /// `staging`, then commits: `previous <- weights`, `weights <- staging`.
    pub fn step(
        &self,
        weights: &mut [f64],
        previous: &mut [f64],
        staging: &mut [f64],
        terms: &UpdateTerms<'_>,
    ) {
        debug_assert_eq!(weights.len(), previous.len());
        debug_assert_eq!(weights.len(), staging.len());
        for k in 0..weights.len() {
            let w = weights[k];
            let error = terms.errors[terms.error_indices[k] + terms.error_offset];
            let activation = terms.activations[terms.activation_indices[k]];
            staging[k] = w
                + self.momentum_factor * (w - previous[k])
                + self.mf_lr * error * activation;
        }
        previous.copy_from_slice(weights);
        weights.copy_from_slice(staging);
    }
}
