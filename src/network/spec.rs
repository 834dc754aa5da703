use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{DfaError, DfaResult};
use crate::optim::optimizer::Optimizer;

/// A fully serializable description of a DFA network: topology, nonlinearities,
/// update rule and the seed that drives weight and feedback initialization.
///
/// Fields:
/// - `input_width`       — values per input row
/// - `hidden_widths`     — width of each hidden layer, input side first; the
///                         length of this list is the network depth
/// - `output_width`      — values per output row
/// - `activation`        — nonlinearity applied after every hidden layer
/// - `output_activation` — nonlinearity applied to the output layer
/// - `optimizer`         — Adam or plain gradient descent
/// - `seed`              — seeds the generator for `W` and `B`
/// - `parallel`          — update layers concurrently once the output error is known
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerSpec {
    pub input_width: usize,
    pub hidden_widths: Vec<usize>,
    pub output_width: usize,
    #[serde(default)]
    pub activation: ActivationFunction,
    #[serde(default)]
    pub output_activation: ActivationFunction,
    #[serde(default)]
    pub optimizer: Optimizer,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub parallel: bool,
}

impl TrainerSpec {
    /// Logistic activations, Adam with default hyperparameters, seed 0.
    pub fn new(input_width: usize, hidden_widths: Vec<usize>, output_width: usize) -> TrainerSpec {
        TrainerSpec {
            input_width,
            hidden_widths,
            output_width,
            activation: ActivationFunction::default(),
            output_activation: ActivationFunction::default(),
            optimizer: Optimizer::default(),
            seed: 0,
            parallel: false,
        }
    }

    pub fn activation(mut self, activation: ActivationFunction) -> TrainerSpec {
        self.activation = activation;
        self
    }

    pub fn output_activation(mut self, activation: ActivationFunction) -> TrainerSpec {
        self.output_activation = activation;
        self
    }

    pub fn optimizer(mut self, optimizer: Optimizer) -> TrainerSpec {
        self.optimizer = optimizer;
        self
    }

    pub fn seed(mut self, seed: u64) -> TrainerSpec {
        self.seed = seed;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> TrainerSpec {
        self.parallel = parallel;
        self
    }

    /// Every width must be positive and there must be at least one hidden
    /// layer; optimizer hyperparameters are checked as well.
    pub fn validate(&self) -> DfaResult<()> {
        if self.input_width == 0 {
            return Err(DfaError::Configuration("input width must be positive".into()));
        }
        if self.output_width == 0 {
            return Err(DfaError::Configuration("output width must be positive".into()));
        }
        if self.hidden_widths.is_empty() {
            return Err(DfaError::Configuration("at least one hidden layer is required".into()));
        }
        if let Some(layer) = self.hidden_widths.iter().position(|&w| w == 0) {
            return Err(DfaError::Configuration(format!("hidden layer {layer} has zero width")));
        }
        self.optimizer.validate()
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> DfaResult<()> {
        for act in [&self.activation, &self.output_activation] {
            if let ActivationFunction::Custom(custom) = act {
                return Err(DfaError::Configuration(format!(
                    "custom activation `{}` cannot be written to JSON",
                    custom.name
                )));
            }
        }
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes and validates a `TrainerSpec` from a JSON file.
    pub fn load_json(path: &str) -> DfaResult<TrainerSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let spec: TrainerSpec = serde_json::from_reader(reader)?;
        spec.validate()?;
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optim::sgd::Sgd;

    #[test]
    fn rejects_bad_topologies() {
        assert!(TrainerSpec::new(2, vec![4, 4], 1).validate().is_ok());
        for spec in [
            TrainerSpec::new(0, vec![4], 1),
            TrainerSpec::new(2, vec![4], 0),
            TrainerSpec::new(2, vec![], 1),
            TrainerSpec::new(2, vec![4, 0, 4], 1),
            TrainerSpec::new(2, vec![4], 1).optimizer(Optimizer::Sgd(Sgd::new(-1.0))),
        ] {
            assert!(matches!(spec.validate(), Err(DfaError::Configuration(_))), "{spec:?}");
        }
    }

    #[test]
    fn json_fills_defaults() {
        let spec: TrainerSpec = serde_json::from_str(
            r#"{"input_width":2,"hidden_widths":[8,8],"output_width":1,"activation":"tanh"}"#,
        )
        .unwrap();
        assert_eq!(spec.activation, ActivationFunction::Tanh);
        assert_eq!(spec.output_activation, ActivationFunction::Logistic);
        assert_eq!(spec.optimizer, Optimizer::default());
        assert_eq!(spec.seed, 0);
        assert!(!spec.parallel);
    }

    #[test]
    fn json_rejects_unknown_activation() {
        let parsed = serde_json::from_str::<TrainerSpec>(
            r#"{"input_width":2,"hidden_widths":[8],"output_width":1,"activation":"everett"}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn save_then_load() {
        let path = std::env::temp_dir().join(format!("dfa-nn-spec-{}.json", std::process::id()));
        let path = path.to_str().unwrap();
        let spec = TrainerSpec::new(3, vec![5, 6], 2)
            .activation(ActivationFunction::Tanh)
            .output_activation(ActivationFunction::Identity)
            .optimizer(Optimizer::Sgd(Sgd::new(0.05)))
            .seed(42)
            .parallel(true);
        spec.save_json(path).unwrap();
        let loaded = TrainerSpec::load_json(path).unwrap();
        std::fs::remove_file(path).unwrap();
        assert_eq!(loaded, spec);
    }
}
