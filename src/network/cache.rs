use crate::network::structure::Structure;

/// Where the network is in its infer/backpropagate cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Idle,
    /// Activation buffers hold the most recent inference.
    Inferred,
}

/// Fixed-size scratch state owned by exactly one `NeuralNet`.
///
/// Every buffer is allocated once at construction and never resized.  Slot 0
/// of `inputs` and `hidden_outputs` is the bias node and always holds 1.0.
#[derive(Debug, Clone)]
pub struct Cache {
    pub(crate) hidden_weights: Vec<f64>,
    pub(crate) output_weights: Vec<f64>,
    pub(crate) previous_hidden_weights: Vec<f64>,
    pub(crate) previous_output_weights: Vec<f64>,
    pub(crate) new_hidden_weights: Vec<f64>,
    pub(crate) new_output_weights: Vec<f64>,

    pub(crate) inputs: Vec<f64>,
    pub(crate) hidden_outputs: Vec<f64>,
    pub(crate) outputs: Vec<f64>,

    pub(crate) output_errors: Vec<f64>,
    pub(crate) hidden_error_sums: Vec<f64>,
    pub(crate) hidden_errors: Vec<f64>,

    pub(crate) output_error_indices: Vec<usize>,
    pub(crate) hidden_output_indices: Vec<usize>,
    pub(crate) hidden_error_indices: Vec<usize>,
    pub(crate) input_indices: Vec<usize>,

    pub(crate) state: CycleState,
}

impl Cache {
    pub fn new(structure: &Structure) -> Cache {
        let num_input_nodes = structure.num_input_nodes();
        let num_hidden_nodes = structure.num_hidden_nodes();
        let num_hidden_weights = structure.num_hidden_weights();
        let num_output_weights = structure.num_output_weights();

        let mut inputs = vec![0.0; num_input_nodes];
        inputs[0] = 1.0;
        let mut hidden_outputs = vec![0.0; num_hidden_nodes];
        hidden_outputs[0] = 1.0;

        let (output_error_indices, hidden_output_indices) =
            index_tables(num_output_weights, num_hidden_nodes);
        let (hidden_error_indices, input_indices) =
            index_tables(num_hidden_weights, num_input_nodes);

        Cache {
            hidden_weights: vec![0.0; num_hidden_weights],
            output_weights: vec![0.0; num_output_weights],
            previous_hidden_weights: vec![0.0; num_hidden_weights],
            previous_output_weights: vec![0.0; num_output_weights],
            new_hidden_weights: vec![0.0; num_hidden_weights],
            new_output_weights: vec![0.0; num_output_weights],
            inputs,
            hidden_outputs,
            outputs: vec![0.0; structure.outputs()],
            output_errors: vec![0.0; structure.outputs()],
            hidden_error_sums: vec![0.0; num_hidden_nodes],
            hidden_errors: vec![0.0; num_hidden_nodes],
            output_error_indices,
            hidden_output_indices,
            hidden_error_indices,
            input_indices,
            state: CycleState::Idle,
        }
    }

    /// Copies the current weights into the previous-weight buffers, so the
    /// next update carries no momentum.
    pub(crate) fn reset_momentum(&mut self) {
        self.previous_hidden_weights.copy_from_slice(&self.hidden_weights);
        self.previous_output_weights.copy_from_slice(&self.output_weights);
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    /// Bias followed by the last inference's inputs.
    pub fn inputs(&self) -> &[f64] {
        &self.inputs
    }

    /// Bias followed by the last inference's hidden activations.
    pub fn hidden_outputs(&self) -> &[f64] {
        &self.hidden_outputs
    }

    pub fn outputs(&self) -> &[f64] {
        &self.outputs
    }

    pub fn hidden_weights(&self) -> &[f64] {
        &self.hidden_weights
    }

    pub fn output_weights(&self) -> &[f64] {
        &self.output_weights
    }

    pub fn previous_hidden_weights(&self) -> &[f64] {
        &self.previous_hidden_weights
    }

    pub fn previous_output_weights(&self) -> &[f64] {
        &self.previous_output_weights
    }

    pub fn output_errors(&self) -> &[f64] {
        &self.output_errors
    }

    pub fn hidden_errors(&self) -> &[f64] {
        &self.hidden_errors
    }

    pub fn output_error_indices(&self) -> &[usize] {
        &self.output_error_indices
    }

    pub fn hidden_output_indices(&self) -> &[usize] {
        &self.hidden_output_indices
    }

    pub fn hidden_error_indices(&self) -> &[usize] {
        &self.hidden_error_indices
    }

    pub fn input_indices(&self) -> &[usize] {
        &self.input_indices
    }
}

/// `(i / nodes, i % nodes)` for every flat weight index `i`.
fn index_tables(num_weights: usize, nodes: usize) -> (Vec<usize>, Vec<usize>) {
    (0..num_weights).map(|i| (i / nodes, i % nodes)).unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffers_have_final_sizes() {
        let s = Structure::new(3, 2, 4).unwrap();
        let c = Cache::new(&s);
        assert_eq!(c.inputs().len(), 4);
        assert_eq!(c.hidden_outputs().len(), 3);
        assert_eq!(c.outputs().len(), 4);
        assert_eq!(c.hidden_weights().len(), 8);
        assert_eq!(c.output_weights().len(), 12);
        assert_eq!(c.hidden_errors().len(), 3);
        assert_eq!(c.inputs()[0], 1.0);
        assert_eq!(c.hidden_outputs()[0], 1.0);
        assert_eq!(c.state(), CycleState::Idle);
    }

    #[test]
    fn index_tables_split_flat_positions() {
        let s = Structure::new(2, 2, 2).unwrap();
        let c = Cache::new(&s);
        // 3 hidden nodes (bias + 2) per output unit.
        assert_eq!(c.output_error_indices(), &[0, 0, 0, 1, 1, 1]);
        assert_eq!(c.hidden_output_indices(), &[0, 1, 2, 0, 1, 2]);
        assert_eq!(c.hidden_error_indices(), &[0, 0, 0, 1, 1, 1]);
        assert_eq!(c.input_indices(), &[0, 1, 2, 0, 1, 2]);
    }
}
