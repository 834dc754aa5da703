use rand::{rngs::StdRng, SeedableRng};
use rayon::prelude::*;
use tracing::{info, trace};

use crate::activation::activation::ActivationFunction;
use crate::error::{DfaResult, ShapeError};
use crate::layers::{dense::TrainableMatrix, feedback::FeedbackMatrix};
use crate::math::matrix::Matrix;
use crate::network::spec::TrainerSpec;

/// Everything the backward step needs from one forward pass.
#[derive(Debug, Clone)]
pub struct ForwardPass {
    /// `y`, one row of `output_width` values.
    pub output: Matrix,
    /// `a_i = W[i] · z_i` for every hidden layer.
    pub pre_activations: Vec<Matrix>,
    /// `z_0 ..= z_L`, all bias-augmented. `z_0` is the input itself.
    pub activations: Vec<Matrix>,
}

/// Trains a dense network with Direct Feedback Alignment.
///
/// Hidden layer `i` never sees the weights above it. Its error signal is the
/// output error `e` projected through its own fixed random matrix `B[i]`, so
/// once `e` is known every layer can build its update independently.
///
/// The trainer owns all weight matrices and their moment buffers; callers
/// only get shared references.
#[derive(Debug, Clone)]
pub struct Trainer {
    spec: TrainerSpec,
    /// `W[0..=L]`, the last entry is the output layer.
    weights: Vec<TrainableMatrix>,
    /// `B[0..L)`, one per hidden layer.
    feedback: Vec<FeedbackMatrix>,
    steps: u64,
}

impl Trainer {
    /// Builds the network described by `spec`.
    ///
    /// All weight matrices are drawn first, input side first, then the
    /// feedback matrices, all from one generator seeded with `spec.seed`.
    pub fn new(spec: TrainerSpec) -> DfaResult<Trainer> {
        spec.validate()?;
        let mut rng = StdRng::seed_from_u64(spec.seed);

        let mut fan_in = spec.input_width;
        let mut weights = Vec::with_capacity(spec.hidden_widths.len() + 1);
        for &width in spec.hidden_widths.iter().chain(std::iter::once(&spec.output_width)) {
            weights.push(TrainableMatrix::new(Matrix::random(&mut rng, fan_in + 1, width)));
            fan_in = width;
        }

        let feedback = spec.hidden_widths.iter()
            .map(|&width| FeedbackMatrix::new(Matrix::random(&mut rng, spec.output_width, width)))
            .collect();

        info!(
            input = spec.input_width,
            hidden = ?spec.hidden_widths,
            output = spec.output_width,
            activation = spec.activation.name(),
            output_activation = spec.output_activation.name(),
            optimizer = spec.optimizer.name(),
            parallel = spec.parallel,
            "built dfa trainer"
        );

        Ok(Trainer { spec, weights, feedback, steps: 0 })
    }

    pub fn spec(&self) -> &TrainerSpec {
        &self.spec
    }

    /// Trainable layers, output layer last.
    pub fn weights(&self) -> &[TrainableMatrix] {
        &self.weights
    }

    pub fn feedback(&self) -> &[FeedbackMatrix] {
        &self.feedback
    }

    /// Number of examples applied so far; the next step uses `steps() + 1`.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Number of hidden layers.
    pub fn depth(&self) -> usize {
        self.feedback.len()
    }

    pub fn forward(&self, input: &Matrix) -> DfaResult<ForwardPass> {
        check_row("forward", input, self.spec.input_width)?;
        let hidden = &self.weights[..self.depth()];
        let output_layer = &self.weights[self.depth()];

        let mut z = input.append_bias_column();
        let mut pre_activations = Vec::with_capacity(hidden.len());
        let mut activations = Vec::with_capacity(hidden.len() + 1);
        for layer in hidden {
            let a = layer.weights().multiply(&z)?;
            let next = self.spec.activation.apply(&a).append_bias_column();
            activations.push(z);
            pre_activations.push(a);
            z = next;
        }

        let output = self.spec.output_activation.apply(&output_layer.weights().multiply(&z)?);
        activations.push(z);
        Ok(ForwardPass { output, pre_activations, activations })
    }

    /// Forward pass only; the trainer is not touched.
    pub fn predict(&self, input: &Matrix) -> DfaResult<Matrix> {
        Ok(self.forward(input)?.output)
    }

    /// DFA pseudo-gradients for one example, one per trainable layer in the
    /// same order as `weights()`.
    pub fn gradients(&self, input: &Matrix, target: &Matrix) -> DfaResult<Vec<Matrix>> {
        let pass = self.forward(input)?;
        let error = self.output_error(&pass, target)?;
        let backward = Backward {
            feedback: &self.feedback,
            pass: &pass,
            error: &error,
            activation: self.spec.activation,
        };
        let gradients = (0..self.weights.len())
            .map(|layer| backward.gradient(layer))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(gradients)
    }

    /// One training iteration: forward, DFA backward, optimizer update on every
    /// trainable layer. Returns the output error `e = y - t`.
    pub fn step(&mut self, input: &Matrix, target: &Matrix) -> DfaResult<Matrix> {
        let pass = self.forward(input)?;
        let error = self.output_error(&pass, target)?;

        self.steps += 1;
        let step = self.steps;
        let optimizer = self.spec.optimizer;
        let backward = Backward {
            feedback: &self.feedback,
            pass: &pass,
            error: &error,
            activation: self.spec.activation,
        };

        // Each layer reads only `e`, its own `a_i`/`z_i` and `B[i]`, and writes
        // only its own weights and moments.
        if self.spec.parallel {
            self.weights.par_iter_mut().enumerate()
                .try_for_each(|(i, layer)| optimizer.apply(layer, &backward.gradient(i)?, step))?;
        } else {
            self.weights.iter_mut().enumerate()
                .try_for_each(|(i, layer)| optimizer.apply(layer, &backward.gradient(i)?, step))?;
        }

        trace!(
            step,
            squared_error = error.data().iter().map(|e| e * e).sum::<f64>(),
            "dfa step"
        );
        Ok(error)
    }

    fn output_error(&self, pass: &ForwardPass, target: &Matrix) -> Result<Matrix, ShapeError> {
        check_row("target", target, self.spec.output_width)?;
        pass.output.subtract(target)
    }
}

/// Read-only inputs shared by every layer's update.
struct Backward<'a> {
    feedback: &'a [FeedbackMatrix],
    pass: &'a ForwardPass,
    error: &'a Matrix,
    activation: ActivationFunction,
}

impl Backward<'_> {
    /// Hidden layer `i`:
    ///   `δ_i = transpose(B[i] · e) ⊙ f'(a_i)`, `∇W[i] = transpose(δ_i · transpose(z_i))`
    /// Output layer:
    ///   `∇W[L] = transpose(transpose(e) · transpose(z_L))`
    fn gradient(&self, layer: usize) -> Result<Matrix, ShapeError> {
        let z = self.pass.activations[layer].transpose();
        if layer == self.feedback.len() {
            return Ok(self.error.transpose().multiply(&z)?.transpose());
        }
        let derivative = self.activation.apply_derivative(&self.pass.pre_activations[layer]);
        let delta = self.feedback[layer].project(self.error)?
            .transpose()
            .hadamard(&derivative)?;
        Ok(delta.multiply(&z)?.transpose())
    }
}

/// Training inputs and targets are single rows of a fixed width.
fn check_row(op: &'static str, m: &Matrix, width: usize) -> Result<(), ShapeError> {
    if m.rows() != 1 || m.cols() != width {
        return Err(ShapeError::new(op, m.shape(), (width, 1)));
    }
    Ok(())
}
