use std::fmt;
use std::sync::Arc;

/// The contract every activation used by the network must satisfy.
///
/// The network only stores post-activation outputs, so the derivative is asked
/// for in terms of the output `y = activate(x)`, never the input `x`.  An
/// activation whose derivative cannot be written as a function of its own
/// output (directly, or by inverting `y` back to `x` in closed form) cannot be
/// used here.
pub trait Activation {
    fn activate(&self, x: f64) -> f64;

    /// dy/dx evaluated at the point where the activation produced `y`.
    fn derivative_from_output(&self, y: f64) -> f64;
}

type ScalarFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Caller-supplied activation: a forward function plus its derivative
/// expressed in terms of the forward function's output.
#[derive(Clone)]
pub struct CustomActivation {
    activate: ScalarFn,
    derivative_from_output: ScalarFn,
}

impl fmt::Debug for CustomActivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomActivation { .. }")
    }
}

#[derive(Debug, Clone)]
pub enum ActivationFunction {
    Linear,
    Sigmoid,
    /// x / (1 + sqrt(1 + x²)), a sigmoid-shaped curve without exponentials.
    RationalSigmoid,
    HyperbolicTangent,
    Custom(CustomActivation),
}

/// Tag written in place of a custom activation, which cannot be persisted.
pub const CUSTOM_TAG: &str = "custom";

impl ActivationFunction {
    pub fn custom<A, D>(activate: A, derivative_from_output: D) -> ActivationFunction
    where
        A: Fn(f64) -> f64 + Send + Sync + 'static,
        D: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        ActivationFunction::Custom(CustomActivation {
            activate: Arc::new(activate),
            derivative_from_output: Arc::new(derivative_from_output),
        })
    }

    /// Name used in persisted records.
    pub fn tag(&self) -> &'static str {
        match self {
            ActivationFunction::Linear => "linear",
            ActivationFunction::Sigmoid => "sigmoid",
            ActivationFunction::RationalSigmoid => "rationalSigmoid",
            ActivationFunction::HyperbolicTangent => "hyperbolicTangent",
            ActivationFunction::Custom(_) => CUSTOM_TAG,
        }
    }

    /// Parses a built-in tag.  The custom sentinel is not a built-in and
    /// yields `None`, like any unknown tag.
    pub fn from_tag(tag: &str) -> Option<ActivationFunction> {
        match tag {
            "linear" => Some(ActivationFunction::Linear),
            "sigmoid" => Some(ActivationFunction::Sigmoid),
            "rationalSigmoid" => Some(ActivationFunction::RationalSigmoid),
            "hyperbolicTangent" => Some(ActivationFunction::HyperbolicTangent),
            _ => None,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, ActivationFunction::Custom(_))
    }
}

impl Activation for ActivationFunction {
    #[inline]
    fn activate(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Linear => x,
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            ActivationFunction::RationalSigmoid => x / (1.0 + (1.0 + x * x).sqrt()),
            ActivationFunction::HyperbolicTangent => x.tanh(),
            ActivationFunction::Custom(custom) => (custom.activate)(x),
        }
    }

    #[inline]
    fn derivative_from_output(&self, y: f64) -> f64 {
        match self {
            ActivationFunction::Linear => 1.0,
            ActivationFunction::Sigmoid => y * (1.0 - y),
            ActivationFunction::RationalSigmoid => {
                // Recover the input from the output, then differentiate.
                let x = -2.0 * y / (y * y - 1.0);
                let x2 = x * x;
                1.0 / (x2 + (x2 + 1.0).sqrt() + 1.0)
            }
            ActivationFunction::HyperbolicTangent => 1.0 - y * y,
            ActivationFunction::Custom(custom) => (custom.derivative_from_output)(y),
        }
    }
}
