use std::fmt;

use serde::{Deserialize, Serialize};

/// On-disk form of a network: layer sizes, rates, activation tag and the
/// flat weight vector (hidden weights followed by output weights).
///
/// Unknown and missing keys are rejected when reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NetworkRecord {
    pub inputs: usize,
    pub hidden: usize,
    pub outputs: usize,
    pub momentum: f64,
    pub learning_rate: f64,
    pub activation_function: String,
    pub weights: Vec<f64>,
}

/// Non-fatal conditions reported while rebuilding a network from a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadWarning {
    /// The record was saved with a custom activation, which cannot be
    /// persisted; the loaded network uses sigmoid instead.
    CustomActivationReplaced,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadWarning::CustomActivationReplaced => {
                f.write_str("custom activation could not be restored, defaulting to sigmoid")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_persisted_key_names() {
        let record = NetworkRecord {
            inputs: 1,
            hidden: 1,
            outputs: 1,
            momentum: 0.5,
            learning_rate: 0.25,
            activation_function: "sigmoid".to_string(),
            weights: vec![0.0; 4],
        };
        let value = serde_json::to_value(&record).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            ["activationFunction", "hidden", "inputs", "learningRate", "momentum", "outputs", "weights"]
        );
    }

    #[test]
    fn rejects_unknown_and_missing_keys() {
        let extra = r#"{"inputs":1,"hidden":1,"outputs":1,"momentum":0,"learningRate":0,
            "activationFunction":"sigmoid","weights":[0,0,0,0],"bias":true}"#;
        assert!(serde_json::from_str::<NetworkRecord>(extra).is_err());
        let missing = r#"{"inputs":1,"hidden":1,"outputs":1,"momentum":0,
            "activationFunction":"sigmoid","weights":[0,0,0,0]}"#;
        assert!(serde_json::from_str::<NetworkRecord>(missing).is_err());
    }
}
