pub mod error;
pub mod activation;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use error::{NeuzError, Result};
pub use activation::activation::Activator;
pub use network::{Axon, GroupLink, LayerSpec, Network, NetworkSpec, Neuron, NeuronGroup, NeuronId};
pub use loss::squared_sum::SquaredSumLoss;
pub use optim::sdm::Sdm;
pub use train::{accumulate_batch, moving_average, train_batch, train_loop, EpochStats, TrainConfig};
