use std::fmt::Debug;
use std::ops::AddAssign;

use ndarray::{Array2, ArrayView1, ArrayView2, Axis, Zip};
use tracing::debug;

use crate::config::{Direction, NanPolicy, RankConfig};
use crate::error::{RankError, Result};
use crate::parallel::count_chunked;
use crate::rank::rank_with;
use crate::samples::SampleMatrix;

/// Integer type a [`CountMatrix`] accumulates into.
pub trait Counter: Copy + Debug + PartialEq + AddAssign + Send + Sync + 'static {
    const ZERO: Self;
    const ONE: Self;
    const NAME: &'static str;

    /// `None` if `n` exceeds the type's range.
    fn from_count(n: usize) -> Option<Self>;

    fn to_f64(self) -> f64;
}

macro_rules! impl_counter {
    ($($t:ty),*) => {
        $(
            impl Counter for $t {
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const NAME: &'static str = stringify!($t);

                fn from_count(n: usize) -> Option<Self> {
                    <$t>::try_from(n).ok()
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_counter!(u8, u16, u32, u64, usize, i32, i64);

/// Occurrence counts with ranks along rows and alternatives along columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CountMatrix<C: Counter = u64> {
    counts: Array2<C>,
    n_iter: usize,
}

impl<C: Counter> CountMatrix<C> {
    /// All-zero counts over `n_alt` alternatives.
    pub fn zeros(n_alt: usize) -> Result<Self> {
        if n_alt == 0 {
            return Err(RankError::InvalidDimension(
                "at least one alternative required".to_string(),
            ));
        }
        Ok(Self::empty(n_alt))
    }

    pub(crate) fn empty(n_alt: usize) -> Self {
        Self {
            counts: Array2::from_elem((n_alt, n_alt), C::ZERO),
            n_iter: 0,
        }
    }

    pub fn n_alternatives(&self) -> usize {
        self.counts.ncols()
    }

    /// Iterations accumulated so far; every column sums to this.
    pub fn n_iterations(&self) -> usize {
        self.n_iter
    }

    /// # Panics
    /// If either index is out of range.
    pub fn get(&self, rank: usize, alternative: usize) -> C {
        self.counts[[rank, alternative]]
    }

    /// Counts per rank for one alternative.
    pub fn column(&self, alternative: usize) -> ArrayView1<'_, C> {
        self.counts.column(alternative)
    }

    /// Counts per alternative for one rank.
    pub fn rank_row(&self, rank: usize) -> ArrayView1<'_, C> {
        self.counts.row(rank)
    }

    pub fn as_array(&self) -> &Array2<C> {
        &self.counts
    }

    pub fn into_array(self) -> Array2<C> {
        self.counts
    }

    /// Tally one iteration's ranks, one per alternative. Nothing changes on error.
    pub fn record(&mut self, ranks: &[usize]) -> Result<()> {
        let n_alt = self.n_alternatives();
        if ranks.len() != n_alt {
            return Err(RankError::InvalidDimension(format!(
                "{} ranks recorded for {} alternatives",
                ranks.len(),
                n_alt
            )));
        }
        if let Some(&rank) = ranks.iter().find(|&&r| r >= n_alt) {
            return Err(RankError::InvalidDimension(format!(
                "rank {} out of range for {} alternatives",
                rank, n_alt
            )));
        }
        self.checked_total(1)?;
        self.tally(ranks);
        Ok(())
    }

    /// Add counts from a disjoint set of iterations over the same alternatives.
    /// Nothing changes on error.
    pub fn merge(&mut self, other: &CountMatrix<C>) -> Result<()> {
        if self.counts.dim() != other.counts.dim() {
            return Err(RankError::InvalidDimension(format!(
                "cannot merge counts over {} alternatives into counts over {}",
                other.n_alternatives(),
                self.n_alternatives()
            )));
        }
        self.checked_total(other.n_iter)?;
        self.absorb(other);
        Ok(())
    }

    /// Fails unless `n_iter + extra` iterations fit in `C`.
    fn checked_total(&self, extra: usize) -> Result<()> {
        let overflow = || RankError::CounterOverflow {
            n_iter: self.n_iter.saturating_add(extra),
            counter: C::NAME,
        };
        let total = self.n_iter.checked_add(extra).ok_or_else(overflow)?;
        C::from_count(total).map(|_| ()).ok_or_else(overflow)
    }

    /// Caller guarantees `ranks` has one in-range rank per alternative and
    /// that the total fits in `C`.
    #[inline]
    pub(crate) fn tally(&mut self, ranks: &[usize]) {
        for (alternative, &rank) in ranks.iter().enumerate() {
            self.counts[[rank, alternative]] += C::ONE;
        }
        self.n_iter += 1;
    }

    /// Caller guarantees equal shapes and that the total fits in `C`.
    pub(crate) fn absorb(&mut self, other: &CountMatrix<C>) {
        Zip::from(&mut self.counts)
            .and(&other.counts)
            .for_each(|a, &b| *a += b);
        self.n_iter += other.n_iter;
    }
}

/// Per-worker scratch: counts plus the buffers one iteration is ranked in.
pub(crate) struct Tally<C: Counter> {
    pub(crate) counts: CountMatrix<C>,
    values: Vec<f64>,
    ranks: Vec<usize>,
}

impl<C: Counter> Tally<C> {
    pub(crate) fn new(n_alt: usize) -> Self {
        Self {
            counts: CountMatrix::empty(n_alt),
            values: vec![0.0; n_alt],
            ranks: vec![0; n_alt],
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, iteration: ArrayView1<'_, f64>, config: &RankConfig) {
        for (dst, &v) in self.values.iter_mut().zip(iteration.iter()) {
            *dst = match config.direction {
                Direction::HigherIsBetter => v,
                Direction::LowerIsBetter => -v,
            };
        }
        rank_with(config.method, &self.values, &mut self.ranks);
        self.counts.tally(&self.ranks);
    }
}

/// Rank counts with the default configuration and `u64` counters.
pub fn count_ranks(samples: &SampleMatrix) -> Result<CountMatrix<u64>> {
    count_ranks_with(samples, &RankConfig::default())
}

pub fn count_ranks_with<C: Counter>(
    samples: &SampleMatrix,
    config: &RankConfig,
) -> Result<CountMatrix<C>> {
    validate::<C>(samples, config)?;

    let n_iter = samples.n_iterations();
    let parallel = config.parallel && n_iter >= config.effective_chunk_size();
    debug!(
        n_alt = samples.n_alternatives(),
        n_iter,
        method = %config.method,
        direction = %config.direction,
        counter = C::NAME,
        parallel,
        "counting ranks"
    );

    if parallel {
        Ok(count_chunked(samples.view(), config))
    } else {
        Ok(count_block(samples.view(), config))
    }
}

/// Check everything that can fail before any counting starts.
pub(crate) fn validate<C: Counter>(samples: &SampleMatrix, config: &RankConfig) -> Result<()> {
    let n_iter = samples.n_iterations();
    if C::from_count(n_iter).is_none() {
        return Err(RankError::CounterOverflow {
            n_iter,
            counter: C::NAME,
        });
    }
    if config.nan_policy == NanPolicy::Reject {
        if let Some((alternative, iteration)) = samples.first_nan() {
            return Err(RankError::NonFiniteValue {
                alternative,
                iteration,
            });
        }
    }
    Ok(())
}

/// Count a block of iterations without validation.
pub(crate) fn count_block<C: Counter>(block: ArrayView2<'_, f64>, config: &RankConfig) -> CountMatrix<C> {
    let mut tally = Tally::new(block.nrows());
    for column in block.axis_iter(Axis(1)) {
        tally.push(column, config);
    }
    tally.counts
}
