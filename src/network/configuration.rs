use crate::activation::ActivationFunction;
use crate::error::{NetError, Result};

/// Training hyperparameters and the activation shared by both layers.
#[derive(Debug, Clone)]
pub struct Configuration {
    activation: ActivationFunction,
    learning_rate: f64,
    momentum_factor: f64,
}

impl Configuration {
    pub fn new(
        activation: ActivationFunction,
        learning_rate: f64,
        momentum_factor: f64,
    ) -> Result<Configuration> {
        check_rate("learning rate", learning_rate)?;
        check_rate("momentum factor", momentum_factor)?;
        Ok(Configuration { activation, learning_rate, momentum_factor })
    }

    /// Assembles a configuration from rates that were validated elsewhere.
    pub(crate) fn from_parts(
        activation: ActivationFunction,
        learning_rate: f64,
        momentum_factor: f64,
    ) -> Configuration {
        Configuration { activation, learning_rate, momentum_factor }
    }

    pub fn activation(&self) -> &ActivationFunction {
        &self.activation
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn momentum_factor(&self) -> f64 {
        self.momentum_factor
    }
}

/// Rates must be non-negative; NaN is rejected as well.
pub(crate) fn check_rate(name: &str, value: f64) -> Result<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(NetError::Configuration(format!("{name} must be >= 0, got {value}")))
    }
}
