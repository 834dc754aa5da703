use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::ops::Neg;

use crate::error::ShapeError;

/// Dense row-major buffer.
///
/// `cols` is the width of one row and `rows` the number of stacked rows, so a
/// row vector of `n` values is `cols = n, rows = 1`. `data.len() == cols * rows`
/// holds for every value of this type; the fields are private so that nothing
/// outside this module can break it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixParts")]
pub struct Matrix {
    cols: usize,
    rows: usize,
    data: Vec<f64>,
}

/// Unchecked wire form; validated on the way into `Matrix`.
#[derive(Deserialize)]
struct MatrixParts {
    cols: usize,
    rows: usize,
    data: Vec<f64>,
}

impl TryFrom<MatrixParts> for Matrix {
    type Error = ShapeError;

    fn try_from(parts: MatrixParts) -> Result<Self, Self::Error> {
        Matrix::new(parts.cols, parts.rows, parts.data)
    }
}

impl Matrix {
    pub fn new(cols: usize, rows: usize, data: Vec<f64>) -> Result<Matrix, ShapeError> {
        if checked_len("new", cols, rows)? != data.len() {
            return Err(ShapeError::new("new", (cols, rows), (data.len(), 1)));
        }
        Ok(Matrix { cols, rows, data })
    }

    pub fn zeros(cols: usize, rows: usize) -> Result<Matrix, ShapeError> {
        let len = checked_len("zeros", cols, rows)?;
        Ok(Matrix { cols, rows, data: vec![0.0; len] })
    }

    /// A single row holding `values`.
    pub fn row(values: Vec<f64>) -> Matrix {
        Matrix { cols: values.len(), rows: 1, data: values }
    }

    /// He initialization: every entry is drawn from N(0, 1) and scaled by
    /// `sqrt(2 / cols)`, where `cols` is the fan-in of one row.
    ///
    /// All draws come from `rng`, so a seeded generator gives a reproducible
    /// matrix.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, cols: usize, rows: usize) -> Matrix {
        let std_dev = (2.0 / cols as f64).sqrt();
        let data = (0..cols * rows)
            .map(|_| sample_standard_normal(rng) * std_dev)
            .collect();
        Matrix { cols, rows, data }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// `(cols, rows)`
    pub fn shape(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn into_data(self) -> Vec<f64> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.data[row * self.cols + col])
    }

    /// In-place access for the optimizer step. A slice cannot grow or shrink,
    /// so the length invariant survives.
    pub(crate) fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// `self · otherᵗ`: both operands keep each logical row contiguous, so the
    /// inner dimension is `cols` on both sides. Entry `(i, j)` of the result is
    /// the dot product of row `j` of `self` with row `i` of `other`; the
    /// result has `cols = self.rows` and `rows = other.rows`.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix, ShapeError> {
        if self.cols != other.cols {
            return Err(ShapeError::new("multiply", self.shape(), other.shape()));
        }
        let mut data: Vec<f64> = Vec::with_capacity(self.rows * other.rows);
        for rhs in other.data.chunks_exact(other.cols.max(1)).take(other.rows) {
            for lhs in self.data.chunks_exact(self.cols.max(1)).take(self.rows) {
                data.push(lhs.iter().zip(rhs).map(|(a, b)| a * b).sum());
            }
        }
        // Zero-width rows still produce a zero-filled result of the right size.
        data.resize(self.rows * other.rows, 0.0);
        Ok(Matrix { cols: self.rows, rows: other.rows, data })
    }

    pub fn transpose(&self) -> Matrix {
        let mut data = Vec::with_capacity(self.data.len());
        for i in 0..self.cols {
            for j in 0..self.rows {
                data.push(self.data[j * self.cols + i]);
            }
        }
        Matrix { cols: self.rows, rows: self.cols, data }
    }

    /// Elementwise product, broadcasting `other` cyclically over `self`.
    pub fn hadamard(&self, other: &Matrix) -> Result<Matrix, ShapeError> {
        self.zip_cyclic("hadamard", other, |a, b| a * b)
    }

    pub fn add(&self, other: &Matrix) -> Result<Matrix, ShapeError> {
        self.zip_cyclic("add", other, |a, b| a + b)
    }

    pub fn subtract(&self, other: &Matrix) -> Result<Matrix, ShapeError> {
        self.zip_cyclic("subtract", other, |a, b| a - b)
    }

    pub fn negate(&self) -> Matrix {
        self.map(|x| -x)
    }

    /// Appends a constant `1.0` to every row so that multiplying by a weight
    /// row with one extra entry folds in an additive bias.
    pub fn append_bias_column(&self) -> Matrix {
        let mut data = Vec::with_capacity((self.cols + 1) * self.rows);
        if self.cols == 0 {
            data.resize(self.rows, 1.0);
        } else {
            for row in self.data.chunks_exact(self.cols) {
                data.extend_from_slice(row);
                data.push(1.0);
            }
        }
        Matrix { cols: self.cols + 1, rows: self.rows, data }
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            cols: self.cols,
            rows: self.rows,
            data: self.data.iter().map(|&x| functor(x)).collect(),
        }
    }

    /// Shared body of the broadcasting elementwise ops. `other` must tile
    /// `self` exactly; its entries are reused in order, wrapping around.
    fn zip_cyclic<F>(&self, op: &'static str, other: &Matrix, functor: F) -> Result<Matrix, ShapeError>
    where
        F: Fn(f64, f64) -> f64,
    {
        if other.data.is_empty() || self.data.len() % other.data.len() != 0 {
            return Err(ShapeError::new(op, self.shape(), other.shape()));
        }
        let data = self.data.iter()
            .zip(other.data.iter().cycle())
            .map(|(&a, &b)| functor(a, b))
            .collect();
        Ok(Matrix { cols: self.cols, rows: self.rows, data })
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { cols: 0, rows: 0, data: vec![] }
    }
}

impl Neg for Matrix {
    type Output = Matrix;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

/// `cols * rows`, or an error when the product does not fit in `usize`.
fn checked_len(op: &'static str, cols: usize, rows: usize) -> Result<usize, ShapeError> {
    cols.checked_mul(rows)
        .ok_or_else(|| ShapeError::new(op, (cols, rows), (usize::MAX, 1)))
}

/// Samples a single value from N(0, 1) using the Box-Muller transform.
fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // Both uniforms live in (0, 1] to avoid log(0).
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = 1.0 - rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}
