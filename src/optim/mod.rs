pub mod momentum;

pub use momentum::{Momentum, UpdateTerms};
