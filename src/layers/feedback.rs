use crate::error::ShapeError;
use crate::math::matrix::Matrix;

/// Fixed random matrix that routes the output error into one hidden layer.
///
/// There is no mutable access and no optimizer state: once built it only
/// projects errors. Shape is `cols = output_width`, `rows = hidden_width`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackMatrix(Matrix);

impl FeedbackMatrix {
    pub fn new(matrix: Matrix) -> FeedbackMatrix {
        FeedbackMatrix(matrix)
    }

    pub fn matrix(&self) -> &Matrix {
        &self.0
    }

    /// `B · e`: one row of `hidden_width` values.
    pub fn project(&self, error: &Matrix) -> Result<Matrix, ShapeError> {
        self.0.multiply(error)
    }
}
