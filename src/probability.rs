use ndarray::{Array2, ArrayView1};

use crate::config::RankConfig;
use crate::count::{count_ranks_with, CountMatrix, Counter};
use crate::error::Result;
use crate::samples::SampleMatrix;

/// Share of iterations in which each alternative attained each rank. Same
/// orientation as [`CountMatrix`]: ranks along rows, alternatives along columns.
#[derive(Debug, Clone, PartialEq)]
pub struct RankProbabilities {
    probabilities: Array2<f64>,
    n_iter: usize,
}

impl RankProbabilities {
    /// Without iterations every probability is 0 and the result is undefined.
    pub fn from_counts<C: Counter>(counts: &CountMatrix<C>) -> Self {
        let n_iter = counts.n_iterations();
        let probabilities = if n_iter == 0 {
            counts.as_array().mapv(|_| 0.0)
        } else {
            let total = n_iter as f64;
            counts.as_array().mapv(|c| c.to_f64() / total)
        };
        Self {
            probabilities,
            n_iter,
        }
    }

    pub fn is_defined(&self) -> bool {
        self.n_iter > 0
    }

    pub fn n_alternatives(&self) -> usize {
        self.probabilities.ncols()
    }

    pub fn n_iterations(&self) -> usize {
        self.n_iter
    }

    /// # Panics
    /// If either index is out of range.
    pub fn probability(&self, alternative: usize, rank: usize) -> f64 {
        self.probabilities[[rank, alternative]]
    }

    /// Distribution over ranks for one alternative.
    pub fn column(&self, alternative: usize) -> ArrayView1<'_, f64> {
        self.probabilities.column(alternative)
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.probabilities
    }

    pub fn into_array(self) -> Array2<f64> {
        self.probabilities
    }
}

pub fn rank_probabilities(samples: &SampleMatrix, config: &RankConfig) -> Result<RankProbabilities> {
    let counts = count_ranks_with::<u64>(samples, config)?;
    Ok(RankProbabilities::from_counts(&counts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn counts_are_divided_by_iterations() {
        let mut counts = CountMatrix::<u32>::zeros(2).unwrap();
        counts.record(&[0, 1]).unwrap();
        counts.record(&[0, 1]).unwrap();
        counts.record(&[1, 0]).unwrap();
        counts.record(&[0, 0]).unwrap();
        let probs = RankProbabilities::from_counts(&counts);
        assert!(probs.is_defined());
        assert_eq!(probs.n_iterations(), 4);
        assert!(approx_eq(probs.probability(0, 0), 0.75, 1e-12));
        assert!(approx_eq(probs.probability(0, 1), 0.25, 1e-12));
        assert!(approx_eq(probs.probability(1, 0), 0.5, 1e-12));
        assert!(approx_eq(probs.probability(1, 1), 0.5, 1e-12));
    }

    #[test]
    fn no_iterations_is_undefined_and_zero() {
        let probs = RankProbabilities::from_counts(&CountMatrix::<u64>::zeros(3).unwrap());
        assert!(!probs.is_defined());
        assert_eq!(probs.n_alternatives(), 3);
        assert!(probs.as_array().iter().all(|&p| p == 0.0));
    }
}
