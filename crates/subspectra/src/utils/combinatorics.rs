//! Binomial coefficients and canonical index-subset enumeration

/// Binomial coefficient C(n, k), `Some(0)` when `k > n` and `None` when the
/// value does not fit in `u64`.
///
/// Multiplicative form: after step i the accumulator is C(n, i + 1), so the
/// product is formed in `u128` and checked against `u64` at every step.
pub fn binomial(n: usize, k: usize) -> Option<u64> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut acc: u64 = 1;
    for i in 0..k {
        let next = u128::from(acc) * (n - i) as u128 / (i + 1) as u128;
        acc = u64::try_from(next).ok()?;
    }
    Some(acc)
}

/// Lexicographic iterator over all `k`-element subsets of `0..n`.
///
/// `IndexSubsets::new(4, 2)` yields `[0,1] [0,2] [0,3] [1,2] [1,3] [2,3]`.
#[derive(Debug, Clone)]
pub struct IndexSubsets {
    n: usize,
    current: Option<Vec<usize>>,
}

impl IndexSubsets {
    /// Start the enumeration. Yields nothing when `k > n`, one empty subset when `k == 0`.
    pub fn new(n: usize, k: usize) -> Self {
        let current = if k <= n { Some((0..k).collect()) } else { None };
        Self { n, current }
    }
}

impl Iterator for IndexSubsets {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let out = self.current.take()?;
        let k = out.len();

        // Rightmost position that can still move right
        let pivot = (0..k).rev().find(|&i| out[i] < self.n - k + i);
        if let Some(i) = pivot {
            let mut succ = out.clone();
            succ[i] += 1;
            for j in i + 1..k {
                succ[j] = succ[j - 1] + 1;
            }
            self.current = Some(succ);
        }

        Some(out)
    }
}

/// Indices of `0..n` not contained in `excluded`, in increasing order
pub fn complement_indices(n: usize, excluded: &[usize]) -> Vec<usize> {
    (0..n).filter(|i| !excluded.contains(i)).collect()
}
