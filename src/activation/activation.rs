use serde::{Serialize, Deserialize};
use std::f64::consts::E;
use std::fmt;

use crate::error::{DfaError, DfaResult};
use crate::math::matrix::Matrix;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    #[default]
    Logistic,
    Identity,
    Tanh,
    /// Caller-supplied nonlinearity. Function pointers have no serialized
    /// form, so specs that use this variant can only be built in code.
    #[serde(skip)]
    Custom(CustomActivation),
}

/// A named element-wise function together with its derivative.
///
/// The derivative is evaluated at the pre-activation value, the same way the
/// built-in variants are.
#[derive(Clone, Copy)]
pub struct CustomActivation {
    pub name: &'static str,
    pub function: fn(f64) -> f64,
    pub derivative: fn(f64) -> f64,
}

impl CustomActivation {
    pub fn new(name: &'static str, function: fn(f64) -> f64, derivative: fn(f64) -> f64) -> CustomActivation {
        CustomActivation { name, function, derivative }
    }
}

impl fmt::Debug for CustomActivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomActivation").field("name", &self.name).finish()
    }
}

// Compared by name; two pointers to the same function are not guaranteed to
// compare equal.
impl PartialEq for CustomActivation {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl ActivationFunction {
    /// Parses a built-in activation by name. Custom activations are never
    /// produced here.
    pub fn from_name(name: &str) -> DfaResult<ActivationFunction> {
        match name.to_ascii_lowercase().as_str() {
            "logistic" | "sigmoid" => Ok(ActivationFunction::Logistic),
            "identity" | "linear" => Ok(ActivationFunction::Identity),
            "tanh" => Ok(ActivationFunction::Tanh),
            other => Err(DfaError::Configuration(format!("unknown activation `{other}`"))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActivationFunction::Logistic => "logistic",
            ActivationFunction::Identity => "identity",
            ActivationFunction::Tanh => "tanh",
            ActivationFunction::Custom(custom) => custom.name,
        }
    }

    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Logistic => logistic(x),
            ActivationFunction::Identity => x,
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::Custom(custom) => (custom.function)(x),
        }
    }

    /// Element-wise derivative, taken at the pre-activation value `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Logistic => {
                let fx = logistic(x);
                fx * (1.0 - fx)
            }
            ActivationFunction::Identity => 1.0,
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationFunction::Custom(custom) => (custom.derivative)(x),
        }
    }

    pub fn apply(&self, pre_activation: &Matrix) -> Matrix {
        pre_activation.map(|x| self.function(x))
    }

    pub fn apply_derivative(&self, pre_activation: &Matrix) -> Matrix {
        pre_activation.map(|x| self.derivative(x))
    }
}

pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn softsign(x: f64) -> f64 {
        x / (1.0 + x.abs())
    }

    fn softsign_derivative(x: f64) -> f64 {
        1.0 / (1.0 + x.abs()).powi(2)
    }

    #[test]
    fn logistic_values() {
        let act = ActivationFunction::Logistic;
        assert_abs_diff_eq!(act.function(0.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(act.derivative(0.0), 0.25, epsilon = 1e-12);
        assert!(act.function(40.0) <= 1.0);
        assert!(act.function(-40.0) >= 0.0);
    }

    #[test]
    fn derivatives_match_finite_differences() {
        let custom = CustomActivation::new("softsign", softsign, softsign_derivative);
        let h = 1e-6;
        for act in [
            ActivationFunction::Logistic,
            ActivationFunction::Identity,
            ActivationFunction::Tanh,
            ActivationFunction::Custom(custom),
        ] {
            for x in [-2.5, -0.3, 0.7, 1.9] {
                let numeric = (act.function(x + h) - act.function(x - h)) / (2.0 * h);
                assert_abs_diff_eq!(act.derivative(x), numeric, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn applies_over_matrix() {
        let pre = Matrix::row(vec![-1.0, 0.0, 2.0]);
        let out = ActivationFunction::Tanh.apply(&pre);
        assert_eq!(out.shape(), pre.shape());
        assert_abs_diff_eq!(out.data()[2], 2.0_f64.tanh(), epsilon = 1e-12);
        let d = ActivationFunction::Identity.apply_derivative(&pre);
        assert_eq!(d.data(), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn parses_names() {
        assert_eq!(ActivationFunction::from_name("Sigmoid").unwrap(), ActivationFunction::Logistic);
        assert_eq!(ActivationFunction::from_name("linear").unwrap(), ActivationFunction::Identity);
        assert!(matches!(
            ActivationFunction::from_name("everett"),
            Err(DfaError::Configuration(_))
        ));
    }

    #[test]
    fn custom_cannot_be_serialized() {
        let custom = ActivationFunction::Custom(CustomActivation::new("softsign", softsign, softsign_derivative));
        assert!(serde_json::to_string(&custom).is_err());
        assert_eq!(serde_json::to_string(&ActivationFunction::Tanh).unwrap(), "\"tanh\"");
    }
}
