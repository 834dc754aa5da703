use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};
use crate::train::epoch_stats::EpochStats;

/// Order in which examples are presented within an epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOrder {
    /// Examples in the order given.
    Sequential,
    /// A fresh permutation every epoch.
    Shuffled { seed: u64 },
    /// `len` independent draws with replacement per epoch.
    Random { seed: u64 },
}

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`      — number of epochs; one epoch applies as many steps as
///                   there are examples
/// - `order`       — how examples are picked within an epoch
/// - `progress_tx` — optional channel sender; one `EpochStats` is sent per
///                   completed epoch.  If the receiver is dropped the loop
///                   terminates early.
/// - `stop_flag`   — optional atomic flag; when set to `true` from another
///                   thread the loop terminates after the current epoch.
pub struct TrainConfig {
    pub epochs: usize,
    pub order: SampleOrder,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` with no progress channel and no stop flag.
    pub fn new(epochs: usize, order: SampleOrder) -> Self {
        TrainConfig {
            epochs,
            order,
            progress_tx: None,
            stop_flag: None,
        }
    }
}
