use serde::{Serialize, Deserialize};

/// Per-epoch statistics returned by `train_loop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total squared-sum loss of the batch.
    pub loss: f64,
    /// Rate used for this epoch's update.
    pub rate: f64,
}
