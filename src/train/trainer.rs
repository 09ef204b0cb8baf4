use crate::{
    error::{NeuzError, Result},
    loss::squared_sum::SquaredSumLoss,
    network::network::Network,
    optim::sdm::Sdm,
};

/// One batch of steepest descent over `inputs`/`expected_outputs` with the
/// squared-sum loss. Returns the total loss of the batch, measured on each
/// sample's forward pass before the update.
pub fn train_batch(
    network: &mut Network,
    inputs: &[Vec<f64>],
    expected_outputs: &[Vec<f64>],
    optimizer: &Sdm,
) -> Result<f64> {
    let total_loss = accumulate_batch(network, inputs, expected_outputs)?;
    optimizer.step(network);
    Ok(total_loss)
}

/// Resets the gradients and backpropagates every sample without applying
/// them. Returns the total squared-sum loss of the batch.
pub fn accumulate_batch(
    network: &mut Network,
    inputs: &[Vec<f64>],
    expected_outputs: &[Vec<f64>],
) -> Result<f64> {
    if inputs.len() != expected_outputs.len() {
        return Err(NeuzError::SizeMismatch {
            expected: inputs.len(),
            actual: expected_outputs.len(),
        });
    }

    network.init_grad();
    let mut total_loss = 0.0;
    for (input, expected) in inputs.iter().zip(expected_outputs.iter()) {
        // Forward pass happens inside backpropagate
        network.backpropagate(input, expected, SquaredSumLoss::gradient)?;
        total_loss += SquaredSumLoss::loss(&network.output(), expected);
    }
    Ok(total_loss)
}
