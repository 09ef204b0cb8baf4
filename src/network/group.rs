use crate::activation::activation::Activator;
use crate::error::{NeuzError, Result};
use crate::network::neuron::Neuron;

/// One layer: neurons sharing a group id, kept in insertion order.
#[derive(Debug, Clone)]
pub struct NeuronGroup {
    id: usize,
    neurons: Vec<Neuron>,
}

impl NeuronGroup {
    pub fn new(id: usize) -> NeuronGroup {
        NeuronGroup { id, neurons: Vec::new() }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn neurons_mut(&mut self) -> &mut [Neuron] {
        &mut self.neurons
    }

    /// Appends a neuron whose id is the current group size.
    pub fn add_one(&mut self) -> Result<&mut Neuron> {
        self.neurons.try_reserve(1)?;
        let nid = self.neurons.len();
        self.neurons.push(Neuron::new(self.id, nid));
        Ok(&mut self.neurons[nid])
    }

    /// Appends `count` neurons. Neurons added before a failure are kept.
    pub fn add_many(&mut self, count: usize) -> Result<()> {
        self.neurons.try_reserve(count)?;
        for _ in 0..count {
            self.add_one()?;
        }
        Ok(())
    }

    /// Grows the group until neuron `nid` exists. The whole shortfall is
    /// reserved up front, so an absurd id fails before anything is added.
    pub(crate) fn grow_to(&mut self, nid: usize) -> Result<()> {
        if nid < self.neurons.len() {
            return Ok(());
        }
        let missing = (nid - self.neurons.len())
            .checked_add(1)
            .ok_or(NeuzError::AllocationFailure)?;
        self.add_many(missing)
    }

    pub fn set_activator(&mut self, activator: Option<Activator>) {
        for neuron in &mut self.neurons {
            neuron.set_activator(activator);
        }
    }

    /// Copies `input` into the neurons positionally. Nothing is written on a
    /// size mismatch.
    pub fn set_input(&mut self, input: &[f64]) -> Result<()> {
        self.check_size(input.len())?;
        for (neuron, &value) in self.neurons.iter_mut().zip(input) {
            neuron.set_input(value);
        }
        Ok(())
    }

    /// Copies the neurons' outputs into `output` positionally.
    pub fn get_output(&self, output: &mut [f64]) -> Result<()> {
        self.check_size(output.len())?;
        for (slot, neuron) in output.iter_mut().zip(&self.neurons) {
            *slot = neuron.output();
        }
        Ok(())
    }

    pub fn outputs(&self) -> Vec<f64> {
        self.neurons.iter().map(Neuron::output).collect()
    }

    pub fn find_neuron(&self, nid: usize) -> Option<&Neuron> {
        self.neurons.iter().find(|n| n.id().neuron == nid)
    }

    pub fn find_neuron_mut(&mut self, nid: usize) -> Option<&mut Neuron> {
        self.neurons.iter_mut().find(|n| n.id().neuron == nid)
    }

    fn check_size(&self, actual: usize) -> Result<()> {
        if actual != self.neurons.len() {
            log::warn!(
                "size mismatch between neuron group {} ({}) and a vector ({})",
                self.id, self.neurons.len(), actual
            );
            return Err(NeuzError::SizeMismatch { expected: self.neurons.len(), actual });
        }
        Ok(())
    }
}
