use serde::{Deserialize, Serialize};

use crate::error::{NetError, Result};

/// Layer sizes of a three-layer network.
///
/// Every layer's activation vector is prefixed by a constant bias unit, so the
/// input and hidden layers each expose one more node than their base count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Structure {
    inputs: usize,
    hidden: usize,
    outputs: usize,
}

impl Structure {
    pub fn new(inputs: usize, hidden: usize, outputs: usize) -> Result<Structure> {
        if inputs == 0 || hidden == 0 || outputs == 0 {
            return Err(NetError::Structure(format!(
                "layer sizes must be positive, got inputs={inputs} hidden={hidden} outputs={outputs}"
            )));
        }
        Ok(Structure { inputs, hidden, outputs })
    }

    pub fn inputs(&self) -> usize {
        self.inputs
    }

    pub fn hidden(&self) -> usize {
        self.hidden
    }

    pub fn outputs(&self) -> usize {
        self.outputs
    }

    /// Input nodes including the bias node.
    pub fn num_input_nodes(&self) -> usize {
        self.inputs + 1
    }

    /// Hidden nodes including the bias node.
    pub fn num_hidden_nodes(&self) -> usize {
        self.hidden + 1
    }

    pub fn num_hidden_weights(&self) -> usize {
        self.hidden * self.num_input_nodes()
    }

    pub fn num_output_weights(&self) -> usize {
        self.outputs * self.num_hidden_nodes()
    }

    pub fn num_weights(&self) -> usize {
        self.num_hidden_weights() + self.num_output_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_counts() {
        let s = Structure::new(3, 4, 2).unwrap();
        assert_eq!(s.num_input_nodes(), 4);
        assert_eq!(s.num_hidden_nodes(), 5);
        assert_eq!(s.num_hidden_weights(), 16);
        assert_eq!(s.num_output_weights(), 10);
        assert_eq!(s.num_weights(), 26);
    }

    #[test]
    fn rejects_empty_layers() {
        for (i, h, o) in [(0, 1, 1), (1, 0, 1), (1, 1, 0)] {
            assert!(matches!(Structure::new(i, h, o), Err(NetError::Structure(_))));
        }
    }
}
