pub mod activation;

pub use activation::{Activation, ActivationFunction, CustomActivation, CUSTOM_TAG};
