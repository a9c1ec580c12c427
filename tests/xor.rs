use rand::rngs::StdRng;
use rand::SeedableRng;
use trilayer_nn::{
    train_loop, ActivationFunction, Configuration, CostFunction, Dataset, NeuralNet, Structure,
    TrainConfig,
};

fn xor_dataset(structure: &Structure) -> Dataset {
    Dataset::with_shared_validation(
        structure,
        vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]],
        vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]],
    )
    .unwrap()
}

fn max_label_distance(net: &mut NeuralNet, dataset: &Dataset) -> f64 {
    dataset
        .validation_inputs()
        .iter()
        .zip(dataset.validation_labels())
        .map(|(input, label)| (net.infer(input).unwrap()[0] - label[0]).abs())
        .fold(0.0, f64::max)
}

#[test]
fn xor_converges_with_momentum() {
    let structure = Structure::new(2, 2, 1).unwrap();
    let dataset = xor_dataset(&structure);
    let cost = CostFunction::MeanSquared;

    // A 2-2-1 sigmoid net occasionally settles in a local minimum, so a few
    // seeds are tried, each with a generous epoch cap.
    for seed in 0..8 {
        let configuration = Configuration::new(ActivationFunction::Sigmoid, 0.2, 0.1).unwrap();
        let mut net = NeuralNet::with_rng(structure, configuration, &mut StdRng::seed_from_u64(seed));

        let report = train_loop(&mut net, &dataset, &cost, 0.05, &TrainConfig::capped(200_000)).unwrap();
        if !report.converged {
            continue;
        }
        assert!(report.validation_cost < 0.05);
        assert_eq!(report.weights, net.all_weights());
        // Sum of squared errors below 0.4 bounds every single error.
        assert!(max_label_distance(&mut net, &dataset) < 0.64);

        // Mean cost below 0.005 means every output is within 0.2 of its label.
        let report = train_loop(&mut net, &dataset, &cost, 0.005, &TrainConfig::capped(400_000)).unwrap();
        if !report.converged {
            continue;
        }
        assert!(max_label_distance(&mut net, &dataset) < 0.2);
        return;
    }
    panic!("no seed converged on XOR");
}

#[test]
fn train_returns_final_weights() {
    let structure = Structure::new(2, 4, 1).unwrap();
    let dataset = xor_dataset(&structure);
    let configuration = Configuration::new(ActivationFunction::HyperbolicTangent, 0.3, 0.2).unwrap();
    let mut net = NeuralNet::with_rng(structure, configuration, &mut StdRng::seed_from_u64(42));
    // Every |tanh - label| is below 2, so this threshold is met after one epoch.
    let weights = net.train(&dataset, &CostFunction::Sum, 2.0).unwrap();
    assert_eq!(weights, net.all_weights());
    assert_eq!(weights.len(), structure.num_weights());
}
