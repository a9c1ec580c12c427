pub mod sum;
pub mod mse;
pub mod cross_entropy;
pub mod cost;

pub use sum::SumLoss;
pub use mse::MseLoss;
pub use cross_entropy::CrossEntropyLoss;
pub use cost::CostFunction;
