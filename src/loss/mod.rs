pub mod squared_sum;

pub use squared_sum::SquaredSumLoss;
