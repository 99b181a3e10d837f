//! Counts how often each alternative attains each rank across Monte-Carlo sample iterations.

pub mod config;
pub mod count;
pub mod error;
pub mod parallel;
pub mod probability;
pub mod rank;
pub mod samples;

pub use config::{Direction, NanPolicy, RankConfig, RankMethod};
pub use count::{count_ranks, count_ranks_with, CountMatrix, Counter};
pub use error::{RankError, Result};
pub use parallel::count_ranks_parallel;
pub use probability::{rank_probabilities, RankProbabilities};
pub use rank::rank_values;
pub use samples::SampleMatrix;
