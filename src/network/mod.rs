pub mod structure;
pub mod configuration;
pub mod cache;
pub mod record;
pub mod network;

pub use structure::Structure;
pub use configuration::Configuration;
pub use cache::{Cache, CycleState};
pub use record::{LoadWarning, NetworkRecord};
pub use network::NeuralNet;
