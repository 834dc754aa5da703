use dfa_nn::{Adam, Matrix, Optimizer, Trainer, TrainerSpec, train_network};

fn main() -> Result<(), dfa_nn::DfaError> {
    let spec = TrainerSpec::new(2, vec![8, 8], 1)
        .optimizer(Optimizer::Adam(Adam::new(0.01)))
        .seed(7);
    let mut trainer = Trainer::new(spec)?;

    let inputs = vec![
        Matrix::row(vec![1.0, 0.0]),
        Matrix::row(vec![1.0, 1.0]),
        Matrix::row(vec![0.0, 1.0]),
        Matrix::row(vec![0.0, 0.0]),
    ];
    let expected_outputs = vec![
        Matrix::row(vec![1.0]),
        Matrix::row(vec![0.0]),
        Matrix::row(vec![1.0]),
        Matrix::row(vec![0.0]),
    ];

    let epochs = 1000;

    for epoch in 0..epochs {
        let loss = train_network(&mut trainer, &inputs, &expected_outputs)?;
        if epoch % 100 == 0 {
            println!("Epoch {epoch}: loss = {loss:.6}");
        }
    }

    for input in &inputs {
        println!("Input: {:?} -> Output: {:.4}", input.data(), trainer.predict(input)?.data()[0]);
    }
    Ok(())
}
