use rand::Rng;
use std::fmt;

use crate::activation::activation::Activator;
use crate::error::Result;

/// Stable address of a neuron inside a `Network`: its group id and its id
/// within that group. Both are dense positions, so a handle indexes directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NeuronId {
    pub group: usize,
    pub neuron: usize,
}

impl NeuronId {
    pub fn new(group: usize, neuron: usize) -> NeuronId {
        NeuronId { group, neuron }
    }
}

impl fmt::Display for NeuronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}:{}", self.group, self.neuron)
    }
}

/// Weighted edge feeding a neuron from an upstream neuron's output.
/// Owned by the downstream neuron; `upstream` is only a lookup handle.
#[derive(Debug, Clone, PartialEq)]
pub struct Axon {
    weight: f64,
    grad: f64,
    upstream: NeuronId,
}

impl Axon {
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    /// Accumulated ∂loss/∂weight since the last `init_grad`.
    pub fn grad(&self) -> f64 {
        self.grad
    }

    pub fn upstream(&self) -> NeuronId {
        self.upstream
    }
}

/// Scalar unit: bias, activator, incoming axons and the cached state of the
/// last forward/backward pass.
#[derive(Debug, Clone)]
pub struct Neuron {
    id: NeuronId,
    input: f64,
    output: f64,
    bias: f64,
    bias_grad: f64,
    error: f64,
    derivative: f64,
    activator: Option<Activator>,
    axons: Vec<Axon>,
}

/// Uniform sample in [-1, 1], used for fresh biases and weights.
fn random_parameter() -> f64 {
    rand::thread_rng().gen_range(-1.0..=1.0)
}

impl Neuron {
    /// New sigmoid neuron with a random bias and no incoming axons.
    pub fn new(group: usize, neuron: usize) -> Neuron {
        Neuron {
            id: NeuronId::new(group, neuron),
            input: 0.0,
            output: 0.0,
            bias: random_parameter(),
            bias_grad: 0.0,
            error: 0.0,
            derivative: 0.0,
            activator: Some(Activator::Sigmoid),
            axons: Vec::new(),
        }
    }

    pub fn id(&self) -> NeuronId {
        self.id
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn set_bias(&mut self, bias: f64) {
        self.bias = bias;
    }

    /// Accumulated ∂loss/∂bias since the last `init_grad`.
    pub fn bias_grad(&self) -> f64 {
        self.bias_grad
    }

    /// Pre-activation value of the last forward pass (the raw value for
    /// passthrough neurons).
    pub fn input(&self) -> f64 {
        self.input
    }

    /// Sets the raw value of a passthrough neuron. Ignored by `forward` on
    /// neurons that have an activator.
    pub fn set_input(&mut self, value: f64) {
        self.input = value;
    }

    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn activator(&self) -> Option<Activator> {
        self.activator
    }

    pub fn set_activator(&mut self, activator: Option<Activator>) {
        self.activator = activator;
    }

    pub fn axons(&self) -> &[Axon] {
        &self.axons
    }

    pub fn axons_mut(&mut self) -> &mut [Axon] {
        &mut self.axons
    }

    /// Appends an axon from `upstream`; a missing weight is drawn from [-1, 1].
    pub fn connect(&mut self, upstream: NeuronId, weight: Option<f64>) -> Result<()> {
        self.axons.try_reserve(1)?;
        self.axons.push(Axon {
            weight: weight.unwrap_or_else(random_parameter),
            grad: 0.0,
            upstream,
        });
        Ok(())
    }

    /// `bias + Σ weight · upstream output`, reading upstream outputs through
    /// `output_of`.
    pub fn net_input<F>(&self, output_of: F) -> f64
    where
        F: Fn(NeuronId) -> f64,
    {
        self.axons.iter()
            .fold(self.bias, |acc, axon| acc + axon.weight * output_of(axon.upstream))
    }

    /// Latches `net_input` and fires the activator. Passthrough neurons
    /// ignore `net_input` and copy their externally set input.
    pub fn forward(&mut self, net_input: f64) -> f64 {
        self.output = match self.activator {
            None => self.input,
            Some(activator) => {
                self.input = net_input;
                activator.function(net_input)
            }
        };
        self.output
    }

    pub fn init_grad(&mut self) {
        for axon in &mut self.axons {
            axon.grad = 0.0;
        }
        self.bias_grad = 0.0;
    }

    /// Clears the error signal and caches f'(input) for the coming reverse pass.
    pub fn init_param(&mut self) {
        self.error = 0.0;
        self.derivative = self.activator
            .map(|a| a.derivative(self.input))
            .unwrap_or(0.0);
    }

    /// Error signal, ∂loss/∂output until this neuron is visited, ∂loss/∂input after.
    pub fn error(&self) -> f64 {
        self.error
    }

    pub(crate) fn add_error(&mut self, delta: f64) {
        self.error += delta;
    }

    pub(crate) fn seed_error(&mut self, error: f64) {
        self.error = error;
    }

    /// Reverse-pass visit. Scales the error signal by the cached derivative
    /// (exactly once), accumulates axon and bias gradients, and returns the
    /// weighted error owed to each upstream neuron.
    pub fn backpropagate_step<F>(&mut self, output_of: F) -> Vec<(NeuronId, f64)>
    where
        F: Fn(NeuronId) -> f64,
    {
        self.error *= self.derivative;
        let error = self.error;
        let owed = self.axons.iter_mut()
            .map(|axon| {
                axon.grad += error * output_of(axon.upstream);
                (axon.upstream, error * axon.weight)
            })
            .collect();
        self.bias_grad += error;
        owed
    }

    /// Steepest-descent update from the accumulated gradients.
    pub fn apply_gradient(&mut self, rate: f64) {
        for axon in &mut self.axons {
            axon.weight -= rate * axon.grad;
        }
        self.bias -= rate * self.bias_grad;
    }
}
