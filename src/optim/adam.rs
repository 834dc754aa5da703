use serde::{Serialize, Deserialize};

use crate::error::ShapeError;
use crate::layers::dense::TrainableMatrix;
use crate::math::matrix::Matrix;
use crate::optim::sgd::check_gradient;

/// Adam with bias-corrected moment estimates.
///
/// Update rule, per entry `j` with its own `(m_j, v_j)` and the 1-based step
/// index `t`:
/// ```text
/// m_j ← β1·m_j + (1-β1)·g_j
/// v_j ← β2·v_j + (1-β2)·g_j²
/// W_j ← W_j - η · (m_j / (1-β1^t)) / (sqrt(v_j / (1-β2^t)) + ε)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adam {
    pub learning_rate: f64,
    #[serde(default = "default_beta1")]
    pub beta1: f64,
    #[serde(default = "default_beta2")]
    pub beta2: f64,
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

fn default_beta1() -> f64 {
    0.9
}

fn default_beta2() -> f64 {
    0.999
}

fn default_epsilon() -> f64 {
    1e-8
}

impl Adam {
    /// β1 = 0.9, β2 = 0.999, ε = 1e-8.
    pub fn new(learning_rate: f64) -> Adam {
        Adam {
            learning_rate,
            beta1: default_beta1(),
            beta2: default_beta2(),
            epsilon: default_epsilon(),
        }
    }

    pub fn with_betas(mut self, beta1: f64, beta2: f64) -> Adam {
        self.beta1 = beta1;
        self.beta2 = beta2;
        self
    }

    /// Applies one update to `param`. `step` is the 1-based index of the
    /// training example being applied and must be the same for every matrix
    /// updated from that example.
    pub fn step(&self, param: &mut TrainableMatrix, grad: &Matrix, step: u64) -> Result<(), ShapeError> {
        check_gradient("adam", param, grad)?;
        let t = step as f64;
        let bias1 = 1.0 - self.beta1.powf(t);
        let bias2 = 1.0 - self.beta2.powf(t);

        let (weights, moments) = param.parts_mut();
        for (j, &g) in grad.data().iter().enumerate() {
            let m = self.beta1 * moments.m[j] + (1.0 - self.beta1) * g;
            let v = self.beta2 * moments.v[j] + (1.0 - self.beta2) * g * g;
            moments.m[j] = m;
            moments.v[j] = v;
            let m_hat = m / bias1;
            let v_hat = v / bias2;
            weights[j] -= self.learning_rate * m_hat / (v_hat.sqrt() + self.epsilon);
        }
        Ok(())
    }
}
