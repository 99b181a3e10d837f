//! Options for rank counting.

use strum_macros::{Display, EnumString};

/// How a single iteration is ranked. Both methods give identical ranks,
/// including for ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum RankMethod {
    /// Count strictly greater values for every alternative, O(n_alt^2).
    #[default]
    #[strum(serialize = "greater-count", to_string = "quadratic")]
    Quadratic,
    /// Sort once and hand each tie group the position of its first member,
    /// O(n_alt log n_alt).
    #[strum(serialize = "sort", to_string = "sorted")]
    Sorted,
}

/// What to do with NaN samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum NanPolicy {
    /// Fail the call with `RankError::NonFiniteValue`.
    #[default]
    #[strum(to_string = "reject")]
    Reject,
    /// NaN is worse than every number. NaNs tie with each other and do not
    /// change the rank of any number.
    #[strum(serialize = "last", to_string = "lowest")]
    Lowest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    /// The greatest value gets rank 0.
    #[default]
    #[strum(serialize = "higher", to_string = "higher-is-better")]
    HigherIsBetter,
    /// The smallest value gets rank 0.
    #[strum(serialize = "lower", to_string = "lower-is-better")]
    LowerIsBetter,
}

/// Configuration for [`count_ranks_with`](crate::count::count_ranks_with).
#[derive(Debug, Clone)]
pub struct RankConfig {
    /// Per-iteration ranking algorithm (default: `Quadratic`).
    pub method: RankMethod,

    /// NaN handling (default: `Reject`).
    pub nan_policy: NanPolicy,

    /// Preferred direction of the sample values (default: `HigherIsBetter`).
    pub direction: Direction,

    /// Split the iteration axis over the rayon pool (default: false).
    pub parallel: bool,

    /// Minimum iterations per parallel work item (default: 4,096).
    ///
    /// Inputs with fewer iterations than this are counted sequentially even
    /// when `parallel` is set.
    pub chunk_size: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            method: RankMethod::default(),
            nan_policy: NanPolicy::default(),
            direction: Direction::default(),
            parallel: false,
            chunk_size: 4_096,
        }
    }
}

impl RankConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: RankMethod) -> Self {
        self.method = method;
        self
    }

    pub fn nan_policy(mut self, policy: NanPolicy) -> Self {
        self.nan_policy = policy;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Zero is treated as one.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub(crate) fn effective_chunk_size(&self) -> usize {
        self.chunk_size.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_parse_case_insensitively() {
        assert_eq!("Sorted".parse::<RankMethod>().unwrap(), RankMethod::Sorted);
        assert_eq!("SORT".parse::<RankMethod>().unwrap(), RankMethod::Sorted);
        assert_eq!("greater-count".parse::<RankMethod>().unwrap(), RankMethod::Quadratic);
        assert_eq!("last".parse::<NanPolicy>().unwrap(), NanPolicy::Lowest);
        assert_eq!("Lower".parse::<Direction>().unwrap(), Direction::LowerIsBetter);
        assert!("median".parse::<RankMethod>().is_err());
    }

    #[test]
    fn options_display_canonical_names() {
        assert_eq!(RankMethod::Quadratic.to_string(), "quadratic");
        assert_eq!(NanPolicy::Reject.to_string(), "reject");
        assert_eq!(Direction::HigherIsBetter.to_string(), "higher-is-better");
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = RankConfig::new()
            .method(RankMethod::Sorted)
            .nan_policy(NanPolicy::Lowest)
            .direction(Direction::LowerIsBetter)
            .parallel(true)
            .chunk_size(0);
        assert_eq!(config.method, RankMethod::Sorted);
        assert_eq!(config.nan_policy, NanPolicy::Lowest);
        assert_eq!(config.direction, Direction::LowerIsBetter);
        assert!(config.parallel);
        assert_eq!(config.chunk_size, 1);
    }
}
