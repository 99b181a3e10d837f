use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RankError {
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),
    /// A NaN sample under [`NanPolicy::Reject`](crate::config::NanPolicy::Reject).
    /// Infinities are ordered values and never raise this.
    #[error("non-finite sample value for alternative {alternative} in iteration {iteration}")]
    NonFiniteValue { alternative: usize, iteration: usize },
    #[error("{n_iter} iterations do not fit in a {counter} counter")]
    CounterOverflow { n_iter: usize, counter: &'static str },
}

pub type Result<T> = std::result::Result<T, RankError>;
