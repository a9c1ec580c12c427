use std::sync::atomic::Ordering;
use std::time::Instant;

use crate::data::Dataset;
use crate::error::{NetError, Result};
use crate::loss::CostFunction;
use crate::network::network::NeuralNet;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_epoch;

/// Outcome of a `train_loop` run.
#[derive(Debug, Clone)]
pub struct TrainReport {
    /// `all_weights()` when the loop ended.
    pub weights: Vec<f64>,
    /// Completed epochs.
    pub epochs: usize,
    /// Mean validation cost after the last completed epoch.
    pub validation_cost: f64,
    /// Whether the validation cost fell below the threshold.
    pub converged: bool,
}

/// Trains `network` epoch by epoch until the mean validation cost is below
/// `error_threshold`.
///
/// Each epoch is one online pass over the training set in its given order,
/// followed by scoring every validation sample with `cost`.
///
/// # Early termination
/// With `TrainConfig::unbounded()` the loop only ends on convergence and
/// never returns if the threshold is unreachable.  Otherwise it also stops
/// when:
/// - `config.max_epochs` epochs have run,
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
///
/// An early stop is not an error; the report has `converged == false`.
pub fn train_loop(
    network: &mut NeuralNet,
    dataset: &Dataset,
    cost: &CostFunction,
    error_threshold: f64,
    config: &TrainConfig,
) -> Result<TrainReport> {
    if error_threshold.is_nan() || error_threshold <= 0.0 {
        return Err(NetError::Train(format!(
            "error threshold must be > 0, got {error_threshold}"
        )));
    }
    if dataset.train_inputs().first().map(Vec::len) != Some(network.structure().inputs())
        || dataset.train_labels().first().map(Vec::len) != Some(network.structure().outputs())
    {
        return Err(NetError::Dataset(
            "dataset shape does not match the network structure".to_string(),
        ));
    }

    let mut epoch = 0;
    let mut validation_cost = f64::INFINITY;

    loop {
        if config.max_epochs.is_some_and(|max| epoch >= max) || stop_requested(config) {
            break;
        }

        let t_start = Instant::now();
        epoch += 1;

        let train_error =
            train_epoch(network, dataset.train_inputs(), dataset.train_labels())?;
        validation_cost = mean_validation_cost(network, dataset, cost)?;

        tracing::debug!(epoch, train_error, validation_cost, "epoch complete");

        let receiver_gone = match config.progress_tx {
            Some(ref tx) => tx
                .send(EpochStats {
                    epoch,
                    train_error,
                    validation_cost,
                    elapsed_ms: t_start.elapsed().as_millis() as u64,
                })
                .is_err(),
            None => false,
        };

        if validation_cost < error_threshold {
            tracing::info!(epoch, validation_cost, "training converged");
            return Ok(TrainReport {
                weights: network.all_weights(),
                epochs: epoch,
                validation_cost,
                converged: true,
            });
        }

        // A dropped receiver means nobody is watching; stop training.
        if receiver_gone {
            break;
        }
    }

    tracing::info!(epoch, validation_cost, "training stopped before convergence");
    Ok(TrainReport {
        weights: network.all_weights(),
        epochs: epoch,
        validation_cost,
        converged: false,
    })
}

fn stop_requested(config: &TrainConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Relaxed))
}

/// Mean of `cost(output, label)` over the validation set.
fn mean_validation_cost(
    network: &mut NeuralNet,
    dataset: &Dataset,
    cost: &CostFunction,
) -> Result<f64> {
    let inputs = dataset.validation_inputs();
    let labels = dataset.validation_labels();
    let mut total = 0.0;
    for (input, label) in inputs.iter().zip(labels.iter()) {
        let output = network.infer(input)?;
        total += cost.cost(output, label);
    }
    Ok(total / inputs.len() as f64)
}
