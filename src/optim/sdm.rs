use crate::network::network::Network;

/// Steepest descent: `param -= rate · accumulated gradient`, no momentum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sdm {
    pub rate: f64,
}

impl Sdm {
    pub fn new(rate: f64) -> Sdm {
        Sdm { rate }
    }

    /// Applies one update to every trainable parameter of `network`.
    pub fn step(&self, network: &mut Network) {
        network.train_sdm(self.rate);
    }
}

impl Network {
    /// Moves every weight and bias against its accumulated gradient. The
    /// input (tail) group is skipped.
    pub fn train_sdm(&mut self, rate: f64) {
        for group in self.groups.iter_mut().skip(1) {
            for neuron in group.neurons_mut() {
                neuron.apply_gradient(rate);
            }
        }
    }
}
