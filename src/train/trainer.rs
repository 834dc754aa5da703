use crate::{
    error::{DfaError, DfaResult},
    loss::mse::MseLoss,
    math::matrix::Matrix,
    network::dfa::Trainer,
};

/// One in-order pass over the examples, one DFA step each. Returns the mean
/// loss seen during the pass.
///
/// # Errors
/// `Configuration` if `inputs` is empty or the lengths differ, before any step
/// is taken; `Shape` if an example does not fit the network.
pub fn train_network(
    trainer: &mut Trainer,
    inputs: &[Matrix],
    targets: &[Matrix],
) -> DfaResult<f64> {
    check_dataset(inputs, targets)?;
    let mut total_loss = 0.0;

    for (input, target) in inputs.iter().zip(targets.iter()) {
        let error = trainer.step(input, target)?;
        total_loss += MseLoss::from_error(&error);
    }

    Ok(total_loss / inputs.len() as f64)
}

/// Every input needs exactly one target, and there must be at least one pair.
pub(crate) fn check_dataset(inputs: &[Matrix], targets: &[Matrix]) -> DfaResult<()> {
    if inputs.is_empty() {
        return Err(DfaError::Configuration("training set is empty".into()));
    }
    if inputs.len() != targets.len() {
        return Err(DfaError::Configuration(format!(
            "{} inputs but {} targets",
            inputs.len(),
            targets.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::spec::TrainerSpec;
    use approx::assert_abs_diff_eq;

    fn data() -> (Vec<Matrix>, Vec<Matrix>) {
        let inputs = vec![Matrix::row(vec![0.0, 1.0]), Matrix::row(vec![1.0, 0.0])];
        let targets = vec![Matrix::row(vec![1.0]), Matrix::row(vec![0.0])];
        (inputs, targets)
    }

    fn trainer() -> Trainer {
        Trainer::new(TrainerSpec::new(2, vec![3], 1).seed(1)).unwrap()
    }

    #[test]
    fn rejects_mismatched_lengths_without_stepping() {
        let (inputs, targets) = data();
        let mut t = trainer();
        let result = train_network(&mut t, &inputs, &targets[..1]);
        assert!(matches!(result, Err(DfaError::Configuration(_))));
        assert_eq!(t.steps(), 0);
    }

    #[test]
    fn rejects_empty_dataset() {
        let mut t = trainer();
        assert!(matches!(train_network(&mut t, &[], &[]), Err(DfaError::Configuration(_))));
        assert_eq!(t.steps(), 0);
    }

    #[test]
    fn returns_mean_loss_of_the_pass() {
        let (inputs, targets) = data();
        let mut t = trainer();
        let mut reference = trainer();
        let mut expected = 0.0;
        for (input, target) in inputs.iter().zip(&targets) {
            expected += MseLoss::from_error(&reference.step(input, target).unwrap());
        }
        expected /= inputs.len() as f64;

        let loss = train_network(&mut t, &inputs, &targets).unwrap();
        assert_abs_diff_eq!(loss, expected, epsilon = 1e-12);
        assert_eq!(t.steps(), 2);
    }
}
