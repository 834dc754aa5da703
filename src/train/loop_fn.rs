use std::sync::atomic::Ordering;
use std::time::Instant;

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::debug;

use crate::error::DfaResult;
use crate::loss::mse::MseLoss;
use crate::math::matrix::Matrix;
use crate::network::dfa::Trainer;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::{SampleOrder, TrainConfig};
use crate::train::trainer::check_dataset;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains for `config.epochs` epochs and returns the mean training loss of
/// the **last completed epoch** (0.0 if none completed).
///
/// # Arguments
/// - `trainer` — modified in place, one DFA step per example
/// - `inputs`  — input rows, each of the trainer's input width
/// - `targets` — corresponding target rows, same length as `inputs`
/// - `config`  — epochs, sample order, optional progress channel and stop flag
///
/// # Early termination
/// The loop breaks early if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
///
/// # Errors
/// `Configuration` if `inputs` is empty or the lengths differ; `Shape` if an
/// example does not fit the network.
pub fn train_loop(
    trainer: &mut Trainer,
    inputs: &[Matrix],
    targets: &[Matrix],
    config: &TrainConfig,
) -> DfaResult<f64> {
    check_dataset(inputs, targets)?;

    let seed = match config.order {
        SampleOrder::Sequential => 0,
        SampleOrder::Shuffled { seed } | SampleOrder::Random { seed } => seed,
    };
    let mut rng = StdRng::seed_from_u64(seed);
    let mut last_train_loss = 0.0;

    for epoch in 1..=config.epochs {
        if stop_requested(config) {
            break;
        }

        let t_start = Instant::now();
        let indices = epoch_indices(config.order, inputs.len(), &mut rng);
        let train_loss = run_one_epoch(trainer, inputs, targets, &indices)?;
        last_train_loss = train_loss;

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            step: trainer.steps(),
            train_loss,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        debug!(epoch, step = stats.step, train_loss, "epoch complete");

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                break;
            }
        }
    }

    Ok(last_train_loss)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn stop_requested(config: &TrainConfig) -> bool {
    config.stop_flag.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed))
}

fn epoch_indices(order: SampleOrder, n: usize, rng: &mut StdRng) -> Vec<usize> {
    match order {
        SampleOrder::Sequential => (0..n).collect(),
        SampleOrder::Shuffled { .. } => {
            let mut indices: Vec<usize> = (0..n).collect();
            indices.shuffle(rng);
            indices
        }
        SampleOrder::Random { .. } => (0..n).map(|_| rng.gen_range(0..n)).collect(),
    }
}

/// Applies one step per index and returns the mean loss.
fn run_one_epoch(
    trainer: &mut Trainer,
    inputs: &[Matrix],
    targets: &[Matrix],
    indices: &[usize],
) -> DfaResult<f64> {
    let mut total_loss = 0.0;
    for &idx in indices {
        let error = trainer.step(&inputs[idx], &targets[idx])?;
        total_loss += MseLoss::from_error(&error);
    }
    Ok(total_loss / indices.len().max(1) as f64)
}
