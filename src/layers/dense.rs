use crate::math::matrix::Matrix;

/// First and second moment estimates for every entry of one weight matrix.
///
/// Allocated zeroed together with the weights and never resized, so index `j`
/// of `m` and `v` always belongs to entry `j` of the weight buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Moments {
    pub m: Vec<f64>,
    pub v: Vec<f64>,
}

impl Moments {
    pub fn zeros(len: usize) -> Moments {
        Moments { m: vec![0.0; len], v: vec![0.0; len] }
    }
}

/// A weight matrix that the optimizer updates, with its bias folded in as the
/// last entry of every row.
///
/// Shape is `cols = fan_in + 1`, `rows = width`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainableMatrix {
    weights: Matrix,
    moments: Moments,
}

impl TrainableMatrix {
    pub fn new(weights: Matrix) -> TrainableMatrix {
        let moments = Moments::zeros(weights.len());
        TrainableMatrix { weights, moments }
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn moments(&self) -> &Moments {
        &self.moments
    }

    pub fn into_weights(self) -> Matrix {
        self.weights
    }

    /// Weight buffer and moment buffers borrowed together for one update.
    pub(crate) fn parts_mut(&mut self) -> (&mut [f64], &mut Moments) {
        (self.weights.data_mut(), &mut self.moments)
    }
}
