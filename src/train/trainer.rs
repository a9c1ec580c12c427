use crate::error::{NetError, Result};
use crate::network::network::NeuralNet;

/// One ordered online pass: `infer` then `backpropagate` for every sample, in
/// the order given.  Returns the mean per-sample training error.
pub fn train_epoch(
    network: &mut NeuralNet,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
) -> Result<f64> {
    if inputs.len() != labels.len() {
        return Err(NetError::Dataset(format!(
            "{} inputs but {} labels",
            inputs.len(),
            labels.len()
        )));
    }
    if inputs.is_empty() {
        return Ok(0.0);
    }
    // Every sample is checked up front so a bad one cannot leave the epoch half applied.
    let structure = *network.structure();
    for (i, (input, label)) in inputs.iter().zip(labels.iter()).enumerate() {
        if input.len() != structure.inputs() {
            return Err(NetError::Dataset(format!(
                "input {i} has length {}, expected {}",
                input.len(),
                structure.inputs()
            )));
        }
        if label.len() != structure.outputs() {
            return Err(NetError::Dataset(format!(
                "label {i} has length {}, expected {}",
                label.len(),
                structure.outputs()
            )));
        }
    }

    let mut total_error = 0.0;
    for (input, label) in inputs.iter().zip(labels.iter()) {
        network.infer(input)?;
        total_error += network.backpropagate(label)?;
    }

    Ok(total_error / inputs.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::ActivationFunction;
    use crate::network::{Configuration, Structure};

    fn net() -> NeuralNet {
        let structure = Structure::new(2, 2, 1).unwrap();
        let configuration = Configuration::new(ActivationFunction::Sigmoid, 0.5, 0.25).unwrap();
        let weights = [0.1, -0.2, 0.3, -0.4, 0.5, 0.6, -0.7, 0.8, 0.9];
        NeuralNet::with_weights(structure, configuration, &weights).unwrap()
    }

    #[test]
    fn epoch_equals_sequential_infer_backpropagate() {
        let inputs = vec![vec![0.0, 1.0], vec![1.0, 1.0], vec![1.0, 0.0]];
        let labels = vec![vec![1.0], vec![0.0], vec![1.0]];

        let mut manual = net();
        let mut errors = Vec::new();
        for (input, label) in inputs.iter().zip(&labels) {
            manual.infer(input).unwrap();
            errors.push(manual.backpropagate(label).unwrap());
        }

        let mut batched = net();
        let mean = train_epoch(&mut batched, &inputs, &labels).unwrap();
        assert_eq!(batched.all_weights(), manual.all_weights());
        assert_eq!(mean, errors.iter().sum::<f64>() / 3.0);
    }

    #[test]
    fn misshaped_later_sample_fails_before_any_update() {
        let mut n = net();
        let before = n.all_weights();
        let inputs = vec![vec![0.0, 1.0], vec![1.0]];
        let labels = vec![vec![1.0], vec![0.0]];
        assert!(matches!(train_epoch(&mut n, &inputs, &labels), Err(NetError::Dataset(_))));

        let inputs = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        let labels = vec![vec![1.0], vec![0.0, 1.0]];
        assert!(matches!(train_epoch(&mut n, &inputs, &labels), Err(NetError::Dataset(_))));
        assert_eq!(n.all_weights(), before);
    }

    #[test]
    fn mismatched_counts_fail_before_any_update() {
        let mut n = net();
        let before = n.all_weights();
        let result = train_epoch(&mut n, &[vec![0.0, 1.0]], &[]);
        assert!(matches!(result, Err(NetError::Dataset(_))));
        assert_eq!(n.all_weights(), before);
    }
}
