pub mod format;
pub mod group;
pub mod network;
pub mod neuron;
pub mod spec;

pub use group::NeuronGroup;
pub use network::Network;
pub use neuron::{Axon, Neuron, NeuronId};
pub use spec::{GroupLink, LayerSpec, NetworkSpec};
