use std::sync::mpsc;
use std::thread;

use trilayer_nn::{
    train_loop, ActivationFunction, Configuration, CostFunction, Dataset, EpochStats, NeuralNet, Structure,
    TrainConfig,
};

fn main() -> trilayer_nn::Result<()> {
    tracing_subscriber::fmt::init();

    let structure = Structure::new(2, 2, 1)?;
    let configuration = Configuration::new(ActivationFunction::Sigmoid, 0.2, 0.1)?;
    let mut network = NeuralNet::new(structure, configuration);

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let expected_outputs = vec![
        vec![1.0],
        vec![0.0],
        vec![1.0],
        vec![0.0],
    ];
    let dataset = Dataset::with_shared_validation(&structure, inputs.clone(), expected_outputs)?;

    let (tx, rx) = mpsc::channel::<EpochStats>();
    let printer = thread::spawn(move || {
        for stats in rx {
            if stats.epoch % 1000 == 0 {
                println!("Epoch {}: validation cost = {:.6}", stats.epoch, stats.validation_cost);
            }
        }
    });

    let config = TrainConfig { max_epochs: Some(500_000), progress_tx: Some(tx), stop_flag: None };
    let report = train_loop(&mut network, &dataset, &CostFunction::MeanSquared, 0.005, &config)?;
    drop(config);
    printer.join().expect("printer thread panicked");

    println!("Converged: {} after {} epochs", report.converged, report.epochs);
    for input in &inputs {
        println!("Input: {:?} -> Output: {:.4}", input, network.infer(input)?[0]);
    }

    let path = std::env::temp_dir().join("xor.json");
    network.save_json(&path)?;
    println!("Saved to {}", path.display());
    Ok(())
}
