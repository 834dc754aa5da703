use serde::{Serialize, Deserialize};

use crate::error::ShapeError;
use crate::layers::dense::TrainableMatrix;
use crate::math::matrix::Matrix;

/// Plain gradient descent: `W ← W - η·∇W`. Moments are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one update to `param` given its gradient.
    pub fn step(&self, param: &mut TrainableMatrix, grad: &Matrix) -> Result<(), ShapeError> {
        check_gradient("sgd", param, grad)?;
        let (weights, _) = param.parts_mut();
        for (w, g) in weights.iter_mut().zip(grad.data()) {
            *w -= self.learning_rate * g;
        }
        Ok(())
    }
}

/// Gradients must match their weight matrix exactly; no broadcasting here.
pub(crate) fn check_gradient(op: &'static str, param: &TrainableMatrix, grad: &Matrix) -> Result<(), ShapeError> {
    if param.weights().shape() != grad.shape() {
        return Err(ShapeError::new(op, param.weights().shape(), grad.shape()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn descends_along_gradient() {
        let mut param = TrainableMatrix::new(Matrix::row(vec![1.0, -1.0]));
        let grad = Matrix::row(vec![0.5, -2.0]);
        Sgd::new(0.1).step(&mut param, &grad).unwrap();
        assert_abs_diff_eq!(param.weights().data()[0], 0.95, epsilon = 1e-12);
        assert_abs_diff_eq!(param.weights().data()[1], -0.8, epsilon = 1e-12);
        assert!(param.moments().m.iter().all(|&m| m == 0.0));
    }

    #[test]
    fn rejects_gradient_of_other_shape() {
        let mut param = TrainableMatrix::new(Matrix::zeros(3, 2).unwrap());
        let grad = Matrix::zeros(2, 3).unwrap();
        assert!(Sgd::new(0.1).step(&mut param, &grad).is_err());
        assert_eq!(param.weights(), &Matrix::zeros(3, 2).unwrap());
    }
}
