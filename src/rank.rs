use std::cmp::Ordering;

use crate::config::RankMethod;

/// `a` beats `b`. NaN loses to every number and ties with NaN; for NaN-free
/// input this is plain `>`.
#[inline]
fn beats(a: f64, b: f64) -> bool {
    match (a.is_nan(), b.is_nan()) {
        (false, true) => true,
        (_, true) | (true, false) => false,
        (false, false) => a > b,
    }
}

/// Descending order consistent with [`beats`]. `0.0` and `-0.0` compare equal.
#[inline]
fn descending(a: f64, b: f64) -> Ordering {
    if beats(a, b) {
        Ordering::Less
    } else if beats(b, a) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Rank of `values[i]` is the number of values strictly greater than it, so
/// 0 is best and tied values share a rank. O(n^2), meant for small `n`.
pub fn rank_greater_count(values: &[f64], ranks: &mut [usize]) {
    debug_assert_eq!(values.len(), ranks.len());
    for (i, rank) in ranks.iter_mut().enumerate() {
        *rank = values.iter().filter(|&&v| beats(v, values[i])).count();
    }
}

/// Same ranks as [`rank_greater_count`], via one sort of the indices.
pub fn rank_sorted(values: &[f64], ranks: &mut [usize]) {
    debug_assert_eq!(values.len(), ranks.len());
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| descending(values[a], values[b]));

    let mut group_start = 0;
    for (pos, &idx) in order.iter().enumerate() {
        if pos > 0 && descending(values[order[pos - 1]], values[idx]) != Ordering::Equal {
            group_start = pos;
        }
        ranks[idx] = group_start;
    }
}

pub fn rank_with(method: RankMethod, values: &[f64], ranks: &mut [usize]) {
    match method {
        RankMethod::Quadratic => rank_greater_count(values, ranks),
        RankMethod::Sorted => rank_sorted(values, ranks),
    }
}

pub fn rank_values(values: &[f64]) -> Vec<usize> {
    let mut ranks = vec![0; values.len()];
    rank_greater_count(values, &mut ranks);
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn both(values: &[f64]) -> (Vec<usize>, Vec<usize>) {
        let mut quadratic = vec![0; values.len()];
        let mut sorted = vec![0; values.len()];
        rank_greater_count(values, &mut quadratic);
        rank_sorted(values, &mut sorted);
        (quadratic, sorted)
    }

    #[test]
    fn strict_order() {
        let (q, s) = both(&[1.0, 0.0, 2.0, 0.5, -3.0]);
        assert_eq!(q, vec![1, 3, 0, 2, 4]);
        assert_eq!(s, q);
    }

    #[test]
    fn ties_share_rank_and_skip_the_next() {
        let (q, s) = both(&[2.0, 5.0, 2.0, 1.0]);
        assert_eq!(q, vec![1, 0, 1, 3]);
        assert_eq!(s, q);
    }

    #[test]
    fn signed_zeros_tie() {
        let (q, s) = both(&[0.0, -0.0]);
        assert_eq!(q, vec![0, 0]);
        assert_eq!(s, q);
    }

    #[test]
    fn infinities_are_ordered() {
        let (q, s) = both(&[f64::NEG_INFINITY, 1.0, f64::INFINITY]);
        assert_eq!(q, vec![2, 1, 0]);
        assert_eq!(s, q);
    }

    #[test]
    fn nan_ranks_below_numbers() {
        let (q, s) = both(&[f64::NAN, 1.0, f64::NAN, f64::NEG_INFINITY]);
        assert_eq!(q, vec![2, 0, 2, 1]);
        assert_eq!(s, q);
    }

    #[test]
    fn single_and_empty() {
        assert_eq!(rank_values(&[42.0]), vec![0]);
        assert!(rank_values(&[]).is_empty());
    }
}
