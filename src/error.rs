use thiserror::Error;

/// Operand dimensions that cannot be combined by a matrix operation.
///
/// Shapes are reported as `(cols, rows)`, the same order `Matrix` stores them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{op}: shape {lhs:?} is incompatible with {rhs:?}")]
pub struct ShapeError {
    pub op: &'static str,
    pub lhs: (usize, usize),
    pub rhs: (usize, usize),
}

impl ShapeError {
    pub fn new(op: &'static str, lhs: (usize, usize), rhs: (usize, usize)) -> ShapeError {
        ShapeError { op, lhs, rhs }
    }
}

#[derive(Debug, Error)]
pub enum DfaError {
    /// A matrix operation was handed operands of the wrong size. This is a
    /// wiring mistake in the topology, not something to retry.
    #[error("shape mismatch: {0}")]
    Shape(#[from] ShapeError),

    /// Rejected at trainer construction or when parsing a named choice.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type DfaResult<T> = Result<T, DfaError>;
