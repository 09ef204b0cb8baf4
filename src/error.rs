use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Every failure the engine can report.
///
/// Structural lookups abort only the call that detected them; the network is
/// left in whatever consistent state it had reached.
#[derive(Debug, Error)]
pub enum NeuzError {
    #[error("neuron group {id} not found")]
    GroupNotFound { id: usize },

    #[error("neuron {group}:{neuron} not found")]
    NeuronNotFound { group: usize, neuron: usize },

    #[error("size mismatch between a neuron group ({expected}) and a vector ({actual})")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("cannot apply backpropagation to a network with {groups} group(s); at least 3 are required")]
    TooFewLayers { groups: usize },

    #[error("network has no neuron groups")]
    EmptyNetwork,

    #[error("cannot allocate memory")]
    AllocationFailure,

    #[error("unknown activator type: {name}")]
    UnknownActivator { name: String },

    #[error("cannot open file {}: {source}", .path.display())]
    FileOpenFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("no [{tag}] section found")]
    MissingTag { tag: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<std::collections::TryReserveError> for NeuzError {
    fn from(_: std::collections::TryReserveError) -> Self {
        NeuzError::AllocationFailure
    }
}

pub type Result<T> = std::result::Result<T, NeuzError>;
