pub mod error;
pub mod math;
pub mod activation;
pub mod loss;
pub mod data;
pub mod network;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use error::{NetError, Result};
pub use activation::{Activation, ActivationFunction};
pub use loss::CostFunction;
pub use data::Dataset;
pub use network::{Cache, Configuration, LoadWarning, NetworkRecord, NeuralNet, Structure};
pub use optim::Momentum;
pub use train::{train_epoch, train_loop, EpochStats, TrainConfig, TrainReport};
