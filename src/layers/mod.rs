pub mod dense;
pub mod feedback;

pub use dense::{Moments, TrainableMatrix};
pub use feedback::FeedbackMatrix;
