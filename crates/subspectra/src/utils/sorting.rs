//! Ordering and prefix-sum helpers for spectra

use std::cmp::Ordering;

/// Descending comparison that never panics on NaN
#[inline]
pub fn descending(a: &f64, b: &f64) -> Ordering {
    b.total_cmp(a)
}

/// Argsort in descending order: `data[result[0]]` is the largest entry
pub fn argsort_descending(data: &[f64]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..data.len()).collect();
    indices.sort_by(|&a, &b| descending(&data[a], &data[b]));
    indices
}

/// Sort a spectrum in place, largest first
pub fn sort_descending(values: &mut [f64]) {
    values.sort_by(descending);
}

/// Smallest prefix sum and full sum of `left[i] − right[i]`.
///
/// The elementwise differences are accumulated with Neumaier compensation,
/// so equal multisets with large running totals report differences at the
/// rounding level of the terms rather than of the totals. Empty input gives
/// `(0, 0)`.
pub fn running_difference(left: &[f64], right: &[f64]) -> (f64, f64) {
    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;
    let mut min_prefix = f64::INFINITY;

    for (a, b) in left.iter().zip(right) {
        let term = a - b;
        let t = sum + term;
        if sum.abs() >= term.abs() {
            compensation += (sum - t) + term;
        } else {
            compensation += (term - t) + sum;
        }
        sum = t;
        min_prefix = min_prefix.min(sum + compensation);
    }

    if min_prefix.is_infinite() {
        return (0.0, 0.0);
    }
    (min_prefix, sum + compensation)
}

/// Repeat every element `copies` times contiguously.
///
/// A descending input stays descending, so prefix sums of the output are
/// still a majorization curve.
pub fn repeat_each(values: &[f64], copies: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len() * copies);
    for &v in values {
        out.extend(std::iter::repeat(v).take(copies));
    }
    out
}

/// Sum of `values[start..=end]`, empty when `start > end`
#[inline]
pub fn window_sum(values: &[f64], start: usize, end: usize) -> f64 {
    if start > end {
        return 0.0;
    }
    values[start..=end].iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argsort_descending() {
        let idx = argsort_descending(&[1.0, 3.0, 2.0]);
        assert_eq!(idx, vec![1, 2, 0]);
    }

    #[test]
    fn test_sort_descending_keeps_ties() {
        let mut v = vec![2.0, 5.0, 2.0, -1.0];
        sort_descending(&mut v);
        assert_eq!(v, vec![5.0, 2.0, 2.0, -1.0]);
    }

    #[test]
    fn test_running_difference() {
        // Differences 1, -1, 0: prefixes 1, 0, 0
        let (min, total) = running_difference(&[3.0, 1.0, 1.0], &[2.0, 2.0, 1.0]);
        assert_eq!(min, 0.0);
        assert_eq!(total, 0.0);
        assert_eq!(running_difference(&[], &[]), (0.0, 0.0));
    }

    #[test]
    fn test_running_difference_keeps_small_terms() {
        // A plain running sum loses the 1.0 next to 1e16
        let (min, total) = running_difference(&[1e16, 1.0, -1e16], &[0.0, 0.0, 0.0]);
        assert_eq!(total, 1.0);
        assert_eq!(min, 1.0);
    }

    #[test]
    fn test_repeat_each() {
        assert_eq!(repeat_each(&[3.0, 1.0], 2), vec![3.0, 3.0, 1.0, 1.0]);
        assert!(repeat_each(&[3.0], 0).is_empty());
    }

    #[test]
    fn test_window_sum() {
        let v = [4.0, 3.0, 2.0, 1.0];
        assert_eq!(window_sum(&v, 1, 2), 5.0);
        assert_eq!(window_sum(&v, 2, 1), 0.0);
    }
}
