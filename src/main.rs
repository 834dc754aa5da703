// Trains XOR with DFA and prints the predictions.
//
//   cargo run -- [spec.json]
//
// Without an argument a two-hidden-layer logistic network with Adam is used.
use std::process::ExitCode;

use dfa_nn::{
    train_loop, ActivationFunction, Adam, DfaResult, Matrix, MseLoss, Optimizer, SampleOrder,
    TrainConfig, Trainer, TrainerSpec,
};

fn default_spec() -> TrainerSpec {
    TrainerSpec::new(2, vec![8, 8], 1)
        .activation(ActivationFunction::Logistic)
        .output_activation(ActivationFunction::Logistic)
        .optimizer(Optimizer::Adam(Adam::new(0.01)))
        .seed(1)
}

fn run() -> DfaResult<()> {
    let spec = match std::env::args().nth(1) {
        Some(path) => TrainerSpec::load_json(&path)?,
        None => default_spec(),
    };

    let inputs = vec![
        Matrix::row(vec![0.0, 0.0]),
        Matrix::row(vec![0.0, 1.0]),
        Matrix::row(vec![1.0, 0.0]),
        Matrix::row(vec![1.0, 1.0]),
    ];
    let targets = vec![
        Matrix::row(vec![0.0]),
        Matrix::row(vec![1.0]),
        Matrix::row(vec![1.0]),
        Matrix::row(vec![0.0]),
    ];

    let mut trainer = Trainer::new(spec)?;
    let (tx, rx) = std::sync::mpsc::channel();
    let mut config = TrainConfig::new(1000, SampleOrder::Sequential);
    config.progress_tx = Some(tx);

    let loss = train_loop(&mut trainer, &inputs, &targets, &config)?;
    drop(config);
    for stats in rx.iter().filter(|s| s.epoch % 100 == 0) {
        println!("Epoch {}: loss = {:.6}", stats.epoch, stats.train_loss);
    }
    println!("Final loss after {} steps: {loss:.6}", trainer.steps());

    let mut prediction_loss = 0.0;
    for (input, target) in inputs.iter().zip(&targets) {
        let output = trainer.predict(input)?;
        prediction_loss += MseLoss::loss(&output, target);
        println!("Input: {:?} -> Output: {:.4}", input.data(), output.data()[0]);
    }
    println!("Prediction MSE: {:.6}", prediction_loss / inputs.len() as f64);
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("dfa-nn: {e}");
            ExitCode::FAILURE
        }
    }
}
