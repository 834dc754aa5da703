//! Construction and training are reproducible from the seed alone.

use dfa_nn::{ActivationFunction, Adam, Matrix, Optimizer, Trainer, TrainerSpec};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn spec(seed: u64) -> TrainerSpec {
    TrainerSpec::new(3, vec![6, 5, 4], 2)
        .activation(ActivationFunction::Tanh)
        .optimizer(Optimizer::Adam(Adam::new(0.01)))
        .seed(seed)
}

/// A fixed stream of random examples, independent of the trainer's seed.
fn examples(count: usize) -> Vec<(Matrix, Matrix)> {
    let mut rng = StdRng::seed_from_u64(99);
    (0..count)
        .map(|_| {
            let input = Matrix::row((0..3).map(|_| rng.gen_range(-1.0..1.0)).collect());
            let target = Matrix::row((0..2).map(|_| rng.gen_range(0.0..1.0)).collect());
            (input, target)
        })
        .collect()
}

fn train(spec: TrainerSpec, data: &[(Matrix, Matrix)]) -> Trainer {
    let mut trainer = Trainer::new(spec).unwrap();
    for (input, target) in data {
        trainer.step(input, target).unwrap();
    }
    trainer
}

fn weight_bits(trainer: &Trainer) -> Vec<u64> {
    trainer.weights().iter()
        .flat_map(|layer| layer.weights().data().iter().map(|w| w.to_bits()))
        .collect()
}

#[test]
fn same_seed_gives_identical_weights() {
    let data = examples(200);
    let a = train(spec(17), &data);
    let b = train(spec(17), &data);
    assert_eq!(weight_bits(&a), weight_bits(&b));
    assert_eq!(a.feedback(), b.feedback());
}

#[test]
fn different_seed_gives_different_weights() {
    let a = Trainer::new(spec(1)).unwrap();
    let b = Trainer::new(spec(2)).unwrap();
    assert_ne!(weight_bits(&a), weight_bits(&b));
}

#[test]
fn parallel_update_matches_sequential() {
    let data = examples(200);
    let sequential = train(spec(8), &data);
    let parallel = train(spec(8).parallel(true), &data);
    assert_eq!(weight_bits(&sequential), weight_bits(&parallel));
    for (s, p) in sequential.weights().iter().zip(parallel.weights()) {
        assert_eq!(s.moments(), p.moments());
    }
}
