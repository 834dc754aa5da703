use serde::{Serialize, Deserialize};

use crate::error::{DfaError, DfaResult, ShapeError};
use crate::layers::dense::TrainableMatrix;
use crate::math::matrix::Matrix;
use crate::optim::{adam::Adam, sgd::Sgd};

/// Update rule applied to every trainable matrix after each example.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Optimizer {
    Sgd(Sgd),
    Adam(Adam),
}

impl Default for Optimizer {
    fn default() -> Self {
        Optimizer::Adam(Adam::new(0.001))
    }
}

impl Optimizer {
    /// Builds an optimizer with default hyperparameters from its name.
    pub fn from_name(name: &str, learning_rate: f64) -> DfaResult<Optimizer> {
        match name.to_ascii_lowercase().as_str() {
            "sgd" | "gd" => Ok(Optimizer::Sgd(Sgd::new(learning_rate))),
            "adam" => Ok(Optimizer::Adam(Adam::new(learning_rate))),
            other => Err(DfaError::Configuration(format!("unknown optimizer `{other}`"))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Optimizer::Sgd(_) => "sgd",
            Optimizer::Adam(_) => "adam",
        }
    }

    pub fn learning_rate(&self) -> f64 {
        match self {
            Optimizer::Sgd(sgd) => sgd.learning_rate,
            Optimizer::Adam(adam) => adam.learning_rate,
        }
    }

    pub fn validate(&self) -> DfaResult<()> {
        let lr = self.learning_rate();
        if !lr.is_finite() || lr <= 0.0 {
            return Err(DfaError::Configuration(format!(
                "learning rate must be positive and finite, got {lr}"
            )));
        }
        if let Optimizer::Adam(adam) = self {
            for (label, beta) in [("beta1", adam.beta1), ("beta2", adam.beta2)] {
                if !(0.0..1.0).contains(&beta) {
                    return Err(DfaError::Configuration(format!("{label} must be in [0, 1), got {beta}")));
                }
            }
            if !adam.epsilon.is_finite() || adam.epsilon <= 0.0 {
                return Err(DfaError::Configuration(format!(
                    "epsilon must be positive and finite, got {}",
                    adam.epsilon
                )));
            }
        }
        Ok(())
    }

    /// Applies one update to `param`; `step` is ignored by plain SGD.
    pub fn apply(&self, param: &mut TrainableMatrix, grad: &Matrix, step: u64) -> Result<(), ShapeError> {
        match self {
            Optimizer::Sgd(sgd) => sgd.step(param, grad),
            Optimizer::Adam(adam) => adam.step(param, grad, step),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names() {
        assert_eq!(Optimizer::from_name("Adam", 0.01).unwrap(), Optimizer::Adam(Adam::new(0.01)));
        assert_eq!(Optimizer::from_name("sgd", 0.5).unwrap(), Optimizer::Sgd(Sgd::new(0.5)));
        assert!(matches!(Optimizer::from_name("rmsprop", 0.01), Err(DfaError::Configuration(_))));
    }

    #[test]
    fn validates_hyperparameters() {
        assert!(Optimizer::default().validate().is_ok());
        assert!(Optimizer::Sgd(Sgd::new(0.0)).validate().is_err());
        assert!(Optimizer::Sgd(Sgd::new(f64::NAN)).validate().is_err());
        assert!(Optimizer::Adam(Adam::new(0.01).with_betas(1.0, 0.999)).validate().is_err());
        assert!(Optimizer::Adam(Adam::new(0.01).with_betas(0.9, -0.1)).validate().is_err());
        let mut adam = Adam::new(0.01);
        adam.epsilon = 0.0;
        assert!(Optimizer::Adam(adam).validate().is_err());
    }

    #[test]
    fn json_is_tagged() {
        let json = serde_json::to_string(&Optimizer::Sgd(Sgd::new(0.25))).unwrap();
        assert_eq!(json, r#"{"type":"sgd","learning_rate":0.25}"#);
        let parsed: Optimizer = serde_json::from_str(r#"{"type":"adam","learning_rate":0.01}"#).unwrap();
        assert_eq!(parsed, Optimizer::Adam(Adam::new(0.01)));
    }
}
