use serde::{Serialize, Deserialize};

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`    — maximum number of batches (one pass over the samples each)
/// - `rate`      — initial steepest-descent rate
/// - `decay`     — factor applied to the rate after every epoch; `1.0` keeps it fixed
/// - `tolerance` — the loop stops, without stepping, once a batch loss falls
///                 below this value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub epochs: usize,
    pub rate: f64,
    pub decay: f64,
    pub tolerance: f64,
}

impl TrainConfig {
    pub fn new(epochs: usize, rate: f64) -> Self {
        TrainConfig {
            epochs,
            rate,
            ..TrainConfig::default()
        }
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            epochs: 10000,
            rate: 0.1,
            decay: 1.0,
            tolerance: 0.0,
        }
    }
}
