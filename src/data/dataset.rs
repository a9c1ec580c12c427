use crate::error::{NetError, Result};
use crate::network::structure::Structure;

/// Training and validation samples whose shapes match a `Structure`.
///
/// Once constructed the four sets are read-only.
#[derive(Debug, Clone)]
pub struct Dataset {
    train_inputs: Vec<Vec<f64>>,
    train_labels: Vec<Vec<f64>>,
    validation_inputs: Vec<Vec<f64>>,
    validation_labels: Vec<Vec<f64>>,
}

impl Dataset {
    /// Fails with `NetError::Dataset` describing the first mismatch found.
    pub fn new(
        structure: &Structure,
        train_inputs: Vec<Vec<f64>>,
        train_labels: Vec<Vec<f64>>,
        validation_inputs: Vec<Vec<f64>>,
        validation_labels: Vec<Vec<f64>>,
    ) -> Result<Dataset> {
        check_pair("training", &train_inputs, &train_labels, structure)?;
        check_pair("validation", &validation_inputs, &validation_labels, structure)?;
        Ok(Dataset { train_inputs, train_labels, validation_inputs, validation_labels })
    }

    /// Validates against the training set itself.
    pub fn with_shared_validation(
        structure: &Structure,
        inputs: Vec<Vec<f64>>,
        labels: Vec<Vec<f64>>,
    ) -> Result<Dataset> {
        let validation_inputs = inputs.clone();
        let validation_labels = labels.clone();
        Dataset::new(structure, inputs, labels, validation_inputs, validation_labels)
    }

    pub fn train_inputs(&self) -> &[Vec<f64>] {
        &self.train_inputs
    }

    pub fn train_labels(&self) -> &[Vec<f64>] {
        &self.train_labels
    }

    pub fn validation_inputs(&self) -> &[Vec<f64>] {
        &self.validation_inputs
    }

    pub fn validation_labels(&self) -> &[Vec<f64>] {
        &self.validation_labels
    }
}

fn check_pair(
    set: &str,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
    structure: &Structure,
) -> Result<()> {
    if inputs.len() != labels.len() {
        return Err(NetError::Dataset(format!(
            "{set} set has {} inputs but {} labels",
            inputs.len(),
            labels.len()
        )));
    }
    if inputs.is_empty() {
        return Err(NetError::Dataset(format!("{set} set is empty")));
    }
    if let Some((i, input)) = inputs.iter().enumerate().find(|(_, v)| v.len() != structure.inputs()) {
        return Err(NetError::Dataset(format!(
            "{set} input {i} has length {}, expected {}",
            input.len(),
            structure.inputs()
        )));
    }
    if let Some((i, label)) = labels.iter().enumerate().find(|(_, v)| v.len() != structure.outputs()) {
        return Err(NetError::Dataset(format!(
            "{set} label {i} has length {}, expected {}",
            label.len(),
            structure.outputs()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structure() -> Structure {
        Structure::new(2, 3, 1).unwrap()
    }

    #[test]
    fn accepts_matching_shapes() {
        let ds = Dataset::new(
            &structure(),
            vec![vec![0.0, 1.0], vec![1.0, 1.0]],
            vec![vec![1.0], vec![0.0]],
            vec![vec![0.5, 0.5]],
            vec![vec![0.5]],
        )
        .unwrap();
        assert_eq!(ds.train_inputs().len(), 2);
        assert_eq!(ds.validation_labels(), &[vec![0.5]]);
    }

    #[test]
    fn reports_first_mismatch() {
        let err = Dataset::new(
            &structure(),
            vec![vec![0.0, 1.0], vec![1.0]],
            vec![vec![1.0], vec![0.0, 0.0]],
            vec![vec![0.5, 0.5]],
            vec![vec![0.5]],
        )
        .unwrap_err();
        match err {
            NetError::Dataset(msg) => assert!(msg.contains("training input 1"), "{msg}"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn rejects_count_mismatch_and_empty_sets() {
        let s = structure();
        assert!(matches!(
            Dataset::new(&s, vec![vec![0.0, 0.0]], vec![], vec![vec![0.0, 0.0]], vec![vec![0.0]]),
            Err(NetError::Dataset(_))
        ));
        assert!(matches!(
            Dataset::new(&s, vec![vec![0.0, 0.0]], vec![vec![0.0]], vec![], vec![]),
            Err(NetError::Dataset(_))
        ));
        assert!(matches!(
            Dataset::with_shared_validation(&s, vec![vec![0.0, 0.0]], vec![vec![0.0, 1.0]]),
            Err(NetError::Dataset(_))
        ));
    }
}
