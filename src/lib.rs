//! Direct Feedback Alignment for small dense networks, built on a from-scratch
//! row-major matrix type.
//!
//! Hidden layers are trained from the output error projected through fixed
//! random feedback matrices rather than through the transposed weights above
//! them. Weights are updated with Adam or plain gradient descent.

pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use error::{DfaError, DfaResult, ShapeError};
pub use math::matrix::Matrix;
pub use activation::activation::{ActivationFunction, CustomActivation};
pub use layers::{dense::TrainableMatrix, feedback::FeedbackMatrix};
pub use network::{dfa::Trainer, spec::TrainerSpec};
pub use loss::mse::MseLoss;
pub use optim::{adam::Adam, optimizer::Optimizer, sgd::Sgd};
pub use train::{train_loop, train_network, SampleOrder, TrainConfig};
