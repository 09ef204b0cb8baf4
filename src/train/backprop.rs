use crate::error::{NeuzError, Result};
use crate::network::network::Network;

impl Network {
    /// Zeroes every axon and bias gradient accumulator. Call once per batch,
    /// before the first `backpropagate`.
    pub fn init_grad(&mut self) {
        for neuron in self.neurons_mut() {
            neuron.init_grad();
        }
    }

    /// Runs a forward pass on `input`, then accumulates ∂loss/∂weight and
    /// ∂loss/∂bias for every non-input neuron.
    ///
    /// `loss_grad(output, target, i)` returns ∂loss/∂output[i]. Gradients
    /// add up across calls until the next `init_grad`, which is how a
    /// mini-batch is formed.
    ///
    /// Refuses networks with fewer than three groups and targets whose
    /// length differs from the output layer; in both cases nothing is
    /// touched.
    pub fn backpropagate<F>(&mut self, input: &[f64], target: &[f64], loss_grad: F) -> Result<()>
    where
        F: Fn(&[f64], &[f64], usize) -> f64,
    {
        let groups = self.groups.len();
        if groups < 3 {
            log::warn!("cannot apply backpropagation to a {}-group network", groups);
            return Err(NeuzError::TooFewLayers { groups });
        }
        // Checked up front so a bad target leaves the network untouched.
        if target.len() != self.output_size() {
            return Err(NeuzError::SizeMismatch { expected: self.output_size(), actual: target.len() });
        }
        let mut output = vec![0.0; target.len()];
        self.propagate(Some(input))?;
        self.get_output(&mut output)?;

        for neuron in self.neurons_mut() {
            neuron.init_param();
        }
        let head = groups - 1;
        for (i, neuron) in self.groups[head].neurons_mut().iter_mut().enumerate() {
            neuron.seed_error(loss_grad(&output, target, i));
        }

        // Outputs are fixed during the reverse pass.
        let outputs = self.outputs_by_group();
        for g in (1..groups).rev() {
            for n in 0..self.groups[g].len() {
                let owed = self.groups[g].neurons_mut()[n]
                    .backpropagate_step(|id| outputs[id.group][id.neuron]);
                for (upstream, delta) in owed {
                    if let Some(neuron) = self.neuron_mut(upstream) {
                        neuron.add_error(delta);
                    }
                }
            }
        }
        Ok(())
    }
}
