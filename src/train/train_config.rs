use std::sync::mpsc;
use std::sync::{atomic::AtomicBool, Arc};

use crate::train::epoch_stats::EpochStats;

/// Options for a `train_loop` run.
///
/// # Fields
/// - `max_epochs`  : stop after this many epochs even if the threshold was not
///                   reached; `None` trains until convergence, however long
/// - `progress_tx` : optional channel; one `EpochStats` is sent per completed
///                   epoch.  If the receiver is dropped the loop stops.
/// - `stop_flag`   : optional atomic flag; when set to `true` from another
///                   thread the loop stops after the current epoch.
#[derive(Debug, Default)]
pub struct TrainConfig {
    pub max_epochs: Option<usize>,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// No cap, no channel, no stop flag.  Training returns only once the
    /// validation cost is below the threshold.
    pub fn unbounded() -> Self {
        TrainConfig::default()
    }

    /// Caps the run at `max_epochs` epochs.
    pub fn capped(max_epochs: usize) -> Self {
        TrainConfig { max_epochs: Some(max_epochs), ..TrainConfig::default() }
    }
}
