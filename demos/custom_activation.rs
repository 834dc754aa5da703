// A deep DFA network with a caller-supplied nonlinearity, signed ±1 targets
// and a linear output unit.
use dfa_nn::{
    train_loop, ActivationFunction, Adam, CustomActivation, Matrix, Optimizer, SampleOrder,
    TrainConfig, Trainer, TrainerSpec,
};

fn softsign(x: f64) -> f64 {
    x / (1.0 + x.abs())
}

fn softsign_derivative(x: f64) -> f64 {
    1.0 / (1.0 + x.abs()).powi(2)
}

fn main() -> Result<(), dfa_nn::DfaError> {
    let activation = CustomActivation::new("softsign", softsign, softsign_derivative);
    let spec = TrainerSpec::new(2, vec![8; 6], 1)
        .activation(ActivationFunction::Custom(activation))
        .output_activation(ActivationFunction::Identity)
        .optimizer(Optimizer::Adam(Adam::new(0.005)))
        .seed(2)
        .parallel(true);
    let mut trainer = Trainer::new(spec)?;

    let data = [
        [-1.0, -1.0, -1.0],
        [-1.0, 1.0, 1.0],
        [1.0, -1.0, 1.0],
        [1.0, 1.0, -1.0],
    ];
    let inputs: Vec<Matrix> = data.iter().map(|d| Matrix::row(vec![d[0], d[1]])).collect();
    let targets: Vec<Matrix> = data.iter().map(|d| Matrix::row(vec![d[2]])).collect();

    let config = TrainConfig::new(1024, SampleOrder::Random { seed: 2 });
    let loss = train_loop(&mut trainer, &inputs, &targets, &config)?;
    println!("Final loss after {} steps: {loss:.6}", trainer.steps());

    for (input, target) in inputs.iter().zip(&targets) {
        let y = trainer.predict(input)?.data()[0];
        println!("Input: {:?} -> Output: {y:+.4} (target {:+})", input.data(), target.data()[0]);
    }
    Ok(())
}
