pub mod backprop;
pub mod trainer;
pub mod epoch_stats;
pub mod train_config;
pub mod loop_fn;

pub use trainer::{accumulate_batch, train_batch};
pub use epoch_stats::EpochStats;
pub use train_config::TrainConfig;
pub use loop_fn::{moving_average, train_loop};
