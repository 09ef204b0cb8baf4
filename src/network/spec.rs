use serde::{Serialize, Deserialize};
use std::path::Path;

use crate::activation::activation::Activator;
use crate::error::{NeuzError, Result};
use crate::network::network::Network;
use crate::train::train_config::TrainConfig;

/// Describes one neuron group in a network specification.
///
/// Fields:
/// - `size`      — number of neurons in the group
/// - `activator` — activator of every neuron in the group; `null` marks a
///                 passthrough (input) group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    pub activator: Option<Activator>,
}

/// Full connection from every neuron of group `from` into every neuron of
/// group `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupLink {
    pub from: usize,
    pub to: usize,
}

/// A serializable description of a network topology plus the
/// hyperparameters to train it with.
///
/// The spec carries no weights; `build()` draws fresh random parameters.
/// Trained parameters are persisted with `Network::save` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name used as the model file stem.
    pub name: String,
    /// Ordered list of groups (input → output).
    pub layers: Vec<LayerSpec>,
    /// Group connections. Empty means consecutive layers are fully connected.
    #[serde(default)]
    pub links: Vec<GroupLink>,
    #[serde(default)]
    pub train: TrainConfig,
}

impl NetworkSpec {
    /// Layered spec: `sizes[0]` passthrough inputs, every other group using
    /// `activator`, consecutive groups fully connected.
    pub fn layered(name: &str, sizes: &[usize], activator: Activator) -> NetworkSpec {
        let layers = sizes.iter().enumerate()
            .map(|(i, &size)| LayerSpec {
                size,
                activator: if i == 0 { None } else { Some(activator) },
            })
            .collect();
        NetworkSpec {
            name: name.to_string(),
            layers,
            links: Vec::new(),
            train: TrainConfig::default(),
        }
    }

    /// Links to apply: the explicit list, or the consecutive chain.
    pub fn effective_links(&self) -> Vec<GroupLink> {
        if !self.links.is_empty() {
            return self.links.clone();
        }
        (1..self.layers.len())
            .map(|to| GroupLink { from: to - 1, to })
            .collect()
    }

    pub fn build(&self) -> Result<Network> {
        let mut net = Network::new();
        for layer in &self.layers {
            net.add_group_set_activator(layer.size, layer.activator)?;
        }
        for link in self.effective_links() {
            net.connect_group(link.from, link.to)?;
        }
        Ok(net)
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| NeuzError::FileOpenFailure {
            path: path.to_path_buf(),
            source,
        })?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<NetworkSpec> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| NeuzError::FileOpenFailure {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
