use crate::error::Result;
use crate::network::network::Network;
use crate::optim::sdm::Sdm;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::accumulate_batch;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` with full-batch steepest descent and returns the stats
/// of every epoch that ran.
///
/// Each epoch resets the gradients, backpropagates every sample, and applies
/// one update at the current rate, which is then multiplied by
/// `config.decay`.
///
/// # Early termination
/// The loop stops before updating once an epoch's batch loss is below
/// `config.tolerance`; that epoch is still reported.
pub fn train_loop(
    network: &mut Network,
    inputs: &[Vec<f64>],
    expected_outputs: &[Vec<f64>],
    config: &TrainConfig,
) -> Result<Vec<EpochStats>> {
    let mut history = Vec::with_capacity(config.epochs);
    let mut rate = config.rate;

    for epoch in 1..=config.epochs {
        let loss = accumulate_batch(network, inputs, expected_outputs)?;
        history.push(EpochStats { epoch, loss, rate });

        if loss < config.tolerance {
            log::debug!("epoch {}: loss {:.6e} below tolerance, stopping", epoch, loss);
            break;
        }
        Sdm::new(rate).step(network);
        rate *= config.decay;
    }

    if let Some(last) = history.last() {
        log::info!("trained {} epoch(s), final loss {:.6e}", last.epoch, last.loss);
    }
    Ok(history)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Trailing moving average of epoch losses over `window` epochs.
pub fn moving_average(history: &[EpochStats], window: usize) -> Vec<f64> {
    if window == 0 || history.len() < window {
        return Vec::new();
    }
    history.windows(window)
        .map(|w| w.iter().map(|s| s.loss).sum::<f64>() / window as f64)
        .collect()
}
