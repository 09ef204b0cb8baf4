use std::fmt;

use crate::activation::activation::Activator;
use crate::error::{NeuzError, Result};
use crate::network::group::NeuronGroup;
use crate::network::neuron::{Neuron, NeuronId};

/// Ordered chain of neuron groups. The first group ever added is the input
/// layer (tail); the most recently added one is the output layer (head).
///
/// Group ids equal their position and neuron ids equal their position inside
/// the group, so axons address upstream neurons by `NeuronId` alone.
#[derive(Debug, Clone, Default)]
pub struct Network {
    pub(crate) groups: Vec<NeuronGroup>,
}

impl Network {
    pub fn new() -> Network {
        Network { groups: Vec::new() }
    }

    pub fn groups(&self) -> &[NeuronGroup] {
        &self.groups
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn input_layer(&self) -> Option<&NeuronGroup> {
        self.groups.first()
    }

    pub fn output_layer(&self) -> Option<&NeuronGroup> {
        self.groups.last()
    }

    pub fn input_size(&self) -> usize {
        self.input_layer().map_or(0, NeuronGroup::len)
    }

    pub fn output_size(&self) -> usize {
        self.output_layer().map_or(0, NeuronGroup::len)
    }

    /// Appends a group of `size` fresh sigmoid neurons; it becomes the head.
    pub fn add_group(&mut self, size: usize) -> Result<&mut NeuronGroup> {
        self.groups.try_reserve(1)?;
        let id = self.groups.len();
        let mut group = NeuronGroup::new(id);
        group.add_many(size)?;
        log::debug!("added neuron group {} with {} neuron(s)", id, size);
        self.groups.push(group);
        Ok(&mut self.groups[id])
    }

    /// `add_group`, then assigns `activator` to every new neuron. By
    /// convention the first group is given `None` to mark the input layer.
    pub fn add_group_set_activator(
        &mut self,
        size: usize,
        activator: Option<Activator>,
    ) -> Result<&mut NeuronGroup> {
        let group = self.add_group(size)?;
        group.set_activator(activator);
        Ok(group)
    }

    pub fn find_group(&self, id: usize) -> Option<&NeuronGroup> {
        self.groups.iter().find(|g| g.id() == id)
    }

    pub fn find_group_mut(&mut self, id: usize) -> Option<&mut NeuronGroup> {
        self.groups.iter_mut().find(|g| g.id() == id)
    }

    pub fn find_neuron(&self, gid: usize, nid: usize) -> Option<&Neuron> {
        self.find_group(gid)?.find_neuron(nid)
    }

    pub fn find_neuron_mut(&mut self, gid: usize, nid: usize) -> Option<&mut Neuron> {
        self.find_group_mut(gid)?.find_neuron_mut(nid)
    }

    pub fn neuron(&self, id: NeuronId) -> Option<&Neuron> {
        self.groups.get(id.group)?.neurons().get(id.neuron)
    }

    pub fn neuron_mut(&mut self, id: NeuronId) -> Option<&mut Neuron> {
        self.groups.get_mut(id.group)?.neurons_mut().get_mut(id.neuron)
    }

    /// Grows groups and neurons until `(gid, nid)` exists, then sets its
    /// activator and bias. Lets a reader materialize neurons in any order.
    ///
    /// Storage for every missing group and neuron is reserved before anything
    /// is added; if that fails the network is left as it was.
    pub fn add_neuron(
        &mut self,
        gid: usize,
        nid: usize,
        activator: Option<Activator>,
        bias: f64,
    ) -> Result<&mut Neuron> {
        if gid >= self.groups.len() {
            let missing = (gid - self.groups.len())
                .checked_add(1)
                .ok_or(NeuzError::AllocationFailure)?;
            self.groups.try_reserve(missing)?;
            let mut target = NeuronGroup::new(gid);
            target.grow_to(nid)?;
            while self.groups.len() < gid {
                self.add_group(0)?;
            }
            self.groups.push(target);
        }
        let group = &mut self.groups[gid];
        group.grow_to(nid)?;
        let neuron = &mut group.neurons_mut()[nid];
        neuron.set_activator(activator);
        neuron.set_bias(bias);
        Ok(neuron)
    }

    /// Fully connects group `upstream` into group `downstream` with random
    /// weights in [-1, 1].
    pub fn connect_group(&mut self, upstream: usize, downstream: usize) -> Result<()> {
        let sources: Vec<NeuronId> = self.find_group(upstream)
            .ok_or(NeuzError::GroupNotFound { id: upstream })?
            .neurons().iter()
            .map(Neuron::id)
            .collect();
        let group = self.find_group_mut(downstream)
            .ok_or(NeuzError::GroupNotFound { id: downstream })?;
        for neuron in group.neurons_mut() {
            for &source in &sources {
                neuron.connect(source, None)?;
            }
        }
        Ok(())
    }

    /// Adds a single axon `(ugid, unid) → (dgid, dnid)` with an explicit weight.
    pub fn connect(
        &mut self,
        ugid: usize,
        unid: usize,
        dgid: usize,
        dnid: usize,
        weight: f64,
    ) -> Result<()> {
        let source = self.find_neuron(ugid, unid)
            .map(Neuron::id)
            .ok_or(NeuzError::NeuronNotFound { group: ugid, neuron: unid })?;
        self.find_neuron_mut(dgid, dnid)
            .ok_or(NeuzError::NeuronNotFound { group: dgid, neuron: dnid })?
            .connect(source, Some(weight))
    }

    pub fn set_input(&mut self, input: &[f64]) -> Result<()> {
        self.groups.first_mut()
            .ok_or(NeuzError::EmptyNetwork)?
            .set_input(input)
    }

    pub fn get_output(&self, output: &mut [f64]) -> Result<()> {
        self.output_layer()
            .ok_or(NeuzError::EmptyNetwork)?
            .get_output(output)
    }

    /// Current outputs of the head group.
    pub fn output(&self) -> Vec<f64> {
        self.output_layer().map(NeuronGroup::outputs).unwrap_or_default()
    }

    fn output_of(&self, id: NeuronId) -> f64 {
        self.neuron(id).map_or(0.0, Neuron::output)
    }

    /// Forward pass. Copies `input` into the input layer when given, then
    /// visits every group once in stored order (tail to head).
    ///
    /// Groups are not sorted topologically: axons must run from
    /// earlier-added to later-added groups for the result to be meaningful.
    pub fn propagate(&mut self, input: Option<&[f64]>) -> Result<()> {
        if let Some(input) = input {
            self.set_input(input)?;
        }
        for index in 0..self.groups.len() {
            self.propagate_group(index);
        }
        Ok(())
    }

    /// Fires every neuron of one group in insertion order. Axons between
    /// members of the same group see whatever the earlier members produced.
    fn propagate_group(&mut self, index: usize) {
        for n in 0..self.groups[index].len() {
            let net_input = self.groups[index].neurons()[n].net_input(|id| self.output_of(id));
            self.groups[index].neurons_mut()[n].forward(net_input);
        }
    }

    /// Snapshot of every neuron output, indexed `[group][neuron]`.
    pub(crate) fn outputs_by_group(&self) -> Vec<Vec<f64>> {
        self.groups.iter().map(NeuronGroup::outputs).collect()
    }

    pub(crate) fn neurons_mut(&mut self) -> impl Iterator<Item = &mut Neuron> {
        self.groups.iter_mut().flat_map(|g| g.neurons_mut().iter_mut())
    }
}

/// Human-readable dump for debugging; not meant to be parsed back.
impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} groups", self.groups.len())?;
        for group in &self.groups {
            writeln!(f, "group #{} : ({} neurons)", group.id(), group.len())?;
            for neuron in group.neurons() {
                let activator = neuron.activator().map_or("nil", |a| a.name());
                writeln!(f, "[{}] {} ({:.10})", neuron.id(), activator, neuron.bias())?;
                for axon in neuron.axons() {
                    writeln!(f, "  |-({:.10})<- [{}]", axon.weight(), axon.upstream())?;
                }
            }
        }
        Ok(())
    }
}
