use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use rand::Rng;

use crate::activation::{Activation, ActivationFunction, CUSTOM_TAG};
use crate::data::Dataset;
use crate::error::{NetError, Result};
use crate::loss::CostFunction;
use crate::math::matrix::{fill_uniform, mat_vec, vec_mat};
use crate::network::cache::{Cache, CycleState};
use crate::network::configuration::Configuration;
use crate::network::record::{LoadWarning, NetworkRecord};
use crate::network::structure::Structure;
use crate::optim::momentum::{Momentum, UpdateTerms};
use crate::train::{train_loop, TrainConfig};

/// A three-layer feed-forward network trained online with momentum.
///
/// `infer` and `backpropagate` form an ordered pair: backpropagation uses the
/// activations left in the cache by the most recent `infer`.  An instance is
/// not safe to share between threads without external synchronization.
#[derive(Debug, Clone)]
pub struct NeuralNet {
    structure: Structure,
    activation: ActivationFunction,
    optimizer: Momentum,
    cache: Cache,
}

impl NeuralNet {
    /// Builds a network with randomized weights drawn from the thread RNG.
    pub fn new(structure: Structure, configuration: Configuration) -> NeuralNet {
        NeuralNet::with_rng(structure, configuration, &mut rand::thread_rng())
    }

    /// Builds a network with randomized weights drawn from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        structure: Structure,
        configuration: Configuration,
        rng: &mut R,
    ) -> NeuralNet {
        let mut net = NeuralNet::empty(structure, configuration);
        net.randomize_weights_with(rng);
        net
    }

    /// Builds a network from a flat weight vector (hidden weights then output
    /// weights).  The previous-weight buffers start equal to `weights`.
    pub fn with_weights(
        structure: Structure,
        configuration: Configuration,
        weights: &[f64],
    ) -> Result<NeuralNet> {
        let mut net = NeuralNet::empty(structure, configuration);
        net.set_weights(weights)?;
        net.cache.reset_momentum();
        Ok(net)
    }

    fn empty(structure: Structure, configuration: Configuration) -> NeuralNet {
        NeuralNet {
            structure,
            optimizer: Momentum::from_configuration(&configuration),
            activation: configuration.activation().clone(),
            cache: Cache::new(&structure),
        }
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    /// The current activation and rates.
    pub fn configuration(&self) -> Configuration {
        Configuration::from_parts(
            self.activation.clone(),
            self.optimizer.learning_rate(),
            self.optimizer.momentum_factor(),
        )
    }

    pub fn learning_rate(&self) -> f64 {
        self.optimizer.learning_rate()
    }

    pub fn momentum_factor(&self) -> f64 {
        self.optimizer.momentum_factor()
    }

    /// `(1 - momentum_factor) * learning_rate`, as used by the next update.
    pub fn mf_lr(&self) -> f64 {
        self.optimizer.mf_lr()
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<()> {
        self.optimizer.set_learning_rate(learning_rate)
    }

    pub fn set_momentum_factor(&mut self, momentum_factor: f64) -> Result<()> {
        self.optimizer.set_momentum_factor(momentum_factor)
    }

    /// Read-only view of the scratch buffers.
    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    // ---------------------------------------------------------------------
    // Weights
    // ---------------------------------------------------------------------

    /// Replaces all weights.  The previous-weight buffers are left as they
    /// are, so momentum history survives the call.
    pub fn set_weights(&mut self, weights: &[f64]) -> Result<()> {
        let expected = self.structure.num_weights();
        if weights.len() != expected {
            return Err(NetError::Weights { expected, actual: weights.len() });
        }
        let (hidden, output) = weights.split_at(self.structure.num_hidden_weights());
        self.cache.hidden_weights.copy_from_slice(hidden);
        self.cache.output_weights.copy_from_slice(output);
        Ok(())
    }

    /// Hidden weights followed by output weights; accepted as-is by `set_weights`.
    pub fn all_weights(&self) -> Vec<f64> {
        let mut weights = Vec::with_capacity(self.structure.num_weights());
        weights.extend_from_slice(&self.cache.hidden_weights);
        weights.extend_from_slice(&self.cache.output_weights);
        weights
    }

    pub fn randomize_weights(&mut self) {
        self.randomize_weights_with(&mut rand::thread_rng());
    }

    /// Draws hidden weights from ±1/sqrt(input nodes) and output weights from
    /// ±1/sqrt(hidden nodes), then clears momentum history.
    ///
    /// The ranges suit sigmoid-shaped activations; they are used unchanged
    /// for linear and custom activations.
    pub fn randomize_weights_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let hidden_bound = 1.0 / (self.structure.num_input_nodes() as f64).sqrt();
        let output_bound = 1.0 / (self.structure.num_hidden_nodes() as f64).sqrt();
        fill_uniform(rng, hidden_bound, &mut self.cache.hidden_weights);
        fill_uniform(rng, output_bound, &mut self.cache.output_weights);
        self.cache.reset_momentum();
        tracing::trace!(hidden_bound, output_bound, "randomized weights");
    }

    // ---------------------------------------------------------------------
    // Inference and backpropagation
    // ---------------------------------------------------------------------

    /// Forward pass.  Leaves inputs and activations in the cache for the
    /// following `backpropagate` call.
    pub fn infer(&mut self, inputs: &[f64]) -> Result<&[f64]> {
        if inputs.len() != self.structure.inputs() {
            return Err(NetError::Inference(format!(
                "expected {} inputs, got {}",
                self.structure.inputs(),
                inputs.len()
            )));
        }
        let activation = &self.activation;
        let cache = &mut self.cache;

        cache.inputs[1..].copy_from_slice(inputs);

        // Hidden activations land one slot to the right, behind the bias.
        mat_vec(&cache.hidden_weights, &cache.inputs, &mut cache.hidden_outputs[1..]);
        for h in &mut cache.hidden_outputs[1..] {
            *h = activation.activate(*h);
        }

        mat_vec(&cache.output_weights, &cache.hidden_outputs, &mut cache.outputs);
        for o in &mut cache.outputs {
            *o = activation.activate(*o);
        }

        cache.state = CycleState::Inferred;
        Ok(cache.outputs.as_slice())
    }

    /// Updates every weight from the error between `labels` and the outputs
    /// of the preceding `infer`, and returns the sum of absolute output errors.
    pub fn backpropagate(&mut self, labels: &[f64]) -> Result<f64> {
        if labels.len() != self.structure.outputs() {
            return Err(NetError::Train(format!(
                "expected {} labels, got {}",
                self.structure.outputs(),
                labels.len()
            )));
        }
        if self.cache.state != CycleState::Inferred {
            return Err(NetError::Train(
                "backpropagate requires a preceding infer".to_string(),
            ));
        }
        let activation = &self.activation;
        let optimizer = &self.optimizer;
        let cache = &mut self.cache;

        for ((e, &o), &label) in cache.output_errors.iter_mut().zip(&cache.outputs).zip(labels) {
            *e = activation.derivative_from_output(o) * (label - o);
        }

        // Errors are propagated through the output weights before they change.
        vec_mat(&cache.output_errors, &cache.output_weights, &mut cache.hidden_error_sums);
        for ((e, &h), &sum) in cache
            .hidden_errors
            .iter_mut()
            .zip(&cache.hidden_outputs)
            .zip(&cache.hidden_error_sums)
        {
            *e = activation.derivative_from_output(h) * sum;
        }

        optimizer.step(
            &mut cache.output_weights,
            &mut cache.previous_output_weights,
            &mut cache.new_output_weights,
            &UpdateTerms {
                errors: &cache.output_errors,
                error_offset: 0,
                activations: &cache.hidden_outputs,
                error_indices: &cache.output_error_indices,
                activation_indices: &cache.hidden_output_indices,
            },
        );

        // Offset 1 skips the bias node's error, which feeds no hidden weight.
        optimizer.step(
            &mut cache.hidden_weights,
            &mut cache.previous_hidden_weights,
            &mut cache.new_hidden_weights,
            &UpdateTerms {
                errors: &cache.hidden_errors,
                error_offset: 1,
                activations: &cache.inputs,
                error_indices: &cache.hidden_error_indices,
                activation_indices: &cache.input_indices,
            },
        );

        cache.state = CycleState::Idle;
        Ok(cache.output_errors.iter().map(|e| e.abs()).sum())
    }

    /// Trains until the mean validation cost drops below `error_threshold`
    /// and returns the final weights.
    ///
    /// There is no epoch cap: if the threshold is never reached this call
    /// does not return.  Use `train::train_loop` with a `TrainConfig` to bound
    /// or interrupt a run.
    pub fn train(
        &mut self,
        dataset: &Dataset,
        cost: &CostFunction,
        error_threshold: f64,
    ) -> Result<Vec<f64>> {
        let report = train_loop(self, dataset, cost, error_threshold, &TrainConfig::unbounded())?;
        Ok(report.weights)
    }

    // ---------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------

    pub fn to_record(&self) -> NetworkRecord {
        NetworkRecord {
            inputs: self.structure.inputs(),
            hidden: self.structure.hidden(),
            outputs: self.structure.outputs(),
            momentum: self.optimizer.momentum_factor(),
            learning_rate: self.optimizer.learning_rate(),
            activation_function: self.activation.tag().to_string(),
            weights: self.all_weights(),
        }
    }

    /// Rebuilds a network from a record.  A custom activation tag falls back
    /// to sigmoid and is reported to `on_warning`; an unknown tag is an error.
    pub fn from_record<F>(record: &NetworkRecord, mut on_warning: F) -> Result<NeuralNet>
    where
        F: FnMut(LoadWarning),
    {
        let structure = Structure::new(record.inputs, record.hidden, record.outputs)?;
        let replaced_custom = record.activation_function == CUSTOM_TAG;
        let activation = if replaced_custom {
            ActivationFunction::Sigmoid
        } else {
            ActivationFunction::from_tag(&record.activation_function).ok_or_else(|| {
                NetError::Storage(format!(
                    "unrecognized activation function {:?}",
                    record.activation_function
                ))
            })?
        };
        let configuration = Configuration::new(activation, record.learning_rate, record.momentum)?;
        let net = NeuralNet::with_weights(structure, configuration, &record.weights)?;
        // Only a record that loads successfully reports its fallback.
        if replaced_custom {
            let warning = LoadWarning::CustomActivationReplaced;
            tracing::warn!("{warning}");
            on_warning(warning);
        }
        Ok(net)
    }

    /// The record to persist.  Non-finite rates or weights would be written as
    /// `null` and could never be read back, so they are rejected.
    fn persistable_record(&self) -> Result<NetworkRecord> {
        let record = self.to_record();
        if !record.learning_rate.is_finite() || !record.momentum.is_finite() {
            return Err(NetError::Storage(format!(
                "cannot persist non-finite rates (learning rate {}, momentum {})",
                record.learning_rate, record.momentum
            )));
        }
        if let Some((i, w)) = record.weights.iter().enumerate().find(|(_, w)| !w.is_finite()) {
            return Err(NetError::Storage(format!("cannot persist non-finite weight {w} at index {i}")));
        }
        if self.activation.is_custom() {
            tracing::warn!("custom activation is saved as {CUSTOM_TAG:?} and will load as sigmoid");
        }
        Ok(record)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.persistable_record()?)?)
    }

    pub fn from_json(json: &str) -> Result<NeuralNet> {
        let record: NetworkRecord = serde_json::from_str(json)?;
        NeuralNet::from_record(&record, |_| {})
    }

    /// Serializes the network to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let record = self.persistable_record()?;
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &record)?;
        tracing::info!(path = %path.display(), "saved network");
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json(path: impl AsRef<Path>) -> Result<NeuralNet> {
        NeuralNet::load_json_with(path, |_| {})
    }

    /// Like `load_json`, reporting non-fatal conditions to `on_warning`.
    pub fn load_json_with<F>(path: impl AsRef<Path>, on_warning: F) -> Result<NeuralNet>
    where
        F: FnMut(LoadWarning),
    {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let record: NetworkRecord = serde_json::from_reader(reader)?;
        let net = NeuralNet::from_record(&record, on_warning)?;
        tracing::info!(path = %path.display(), "loaded network");
        Ok(net)
    }
}
