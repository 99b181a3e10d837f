use ndarray::{ArrayView2, Axis};
use rayon::prelude::*;
use tracing::trace;

use crate::config::RankConfig;
use crate::count::{validate, CountMatrix, Counter, Tally};
use crate::error::Result;
use crate::samples::SampleMatrix;

/// Rank counts computed over runs of iterations on the rayon pool.
///
/// Ignores `config.parallel`; identical to the sequential count for the same
/// input and configuration.
pub fn count_ranks_parallel<C: Counter>(
    samples: &SampleMatrix,
    config: &RankConfig,
) -> Result<CountMatrix<C>> {
    validate::<C>(samples, config)?;
    Ok(count_chunked(samples.view(), config))
}

/// Caller has validated `data` for `C`, so partial sums cannot overflow.
pub(crate) fn count_chunked<C: Counter>(
    data: ArrayView2<'_, f64>,
    config: &RankConfig,
) -> CountMatrix<C> {
    let (n_alt, n_iter) = data.dim();
    let chunk = config.effective_chunk_size();
    trace!(n_iter, chunk, "splitting iterations over rayon pool");

    // Each worker run tallies into its own matrix; partials are summed at the end.
    data.axis_iter(Axis(1))
        .into_par_iter()
        .with_min_len(chunk)
        .fold(
            || Tally::new(n_alt),
            |mut tally, iteration| {
                tally.push(iteration, config);
                tally
            },
        )
        .map(|tally| tally.counts)
        .reduce(
            || CountMatrix::empty(n_alt),
            |mut total, partial| {
                total.absorb(&partial);
                total
            },
        )
}
