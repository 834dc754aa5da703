use crate::math::matrix::Matrix;

/// Squared-error loss. Its gradient with respect to the output is `y - t`,
/// which is exactly the error row the trainer feeds back.
pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - expected)²)
    pub fn loss(predicted: &Matrix, expected: &Matrix) -> f64 {
        let n = predicted.len().max(1) as f64;
        predicted.data().iter().zip(expected.data())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>() / n
    }

    /// Mean of the squared entries of an error row already computed as `y - t`.
    pub fn from_error(error: &Matrix) -> f64 {
        let n = error.len().max(1) as f64;
        error.data().iter().map(|e| e * e).sum::<f64>() / n
    }
}
