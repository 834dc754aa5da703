use serde::{Serialize, Deserialize};

/// Per-epoch training statistics emitted by `train_loop`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub total_epochs: usize,
    /// Trainer step count after this epoch.
    pub step: u64,
    /// Mean squared error over the examples applied in this epoch, measured
    /// before each example's update.
    pub train_loss: f64,
    pub elapsed_ms: u64,
}
