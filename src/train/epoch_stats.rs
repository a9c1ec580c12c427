use serde::{Deserialize, Serialize};

/// Per-epoch statistics emitted by `train_loop`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, one value is
/// sent at the end of every completed epoch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Mean over training samples of the summed absolute output error.
    pub train_error: f64,
    /// Mean validation cost, the value compared against the threshold.
    pub validation_cost: f64,
    /// Wall-clock duration of this epoch (training and validation) in milliseconds.
    pub elapsed_ms: u64,
}
