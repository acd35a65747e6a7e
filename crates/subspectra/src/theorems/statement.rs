//! Human-readable statements of the checked results.

use crate::error::SpectraError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four checked results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theorem {
    /// Theorem 1.4
    AggregateBounds,
    /// Theorem 2.2
    WeightedProjection,
    /// Theorem 4.1
    Hierarchy,
    /// Lemma 3.1
    PolynomialLemma,
}

impl Theorem {
    /// Every theorem, in numbering order of the paper sections
    pub const ALL: [Theorem; 4] = [
        Theorem::AggregateBounds,
        Theorem::WeightedProjection,
        Theorem::PolynomialLemma,
        Theorem::Hierarchy,
    ];

    /// Short label
    pub fn label(&self) -> &'static str {
        match self {
            Theorem::AggregateBounds => "Theorem 1.4",
            Theorem::WeightedProjection => "Theorem 2.2",
            Theorem::Hierarchy => "Theorem 4.1",
            Theorem::PolynomialLemma => "Lemma 3.1",
        }
    }

    /// Title
    pub fn title(&self) -> &'static str {
        match self {
            Theorem::AggregateBounds => "Aggregate bounds on deleted-index spectra",
            Theorem::WeightedProjection => "Weighted bounds for a rank-one compression",
            Theorem::Hierarchy => "Spectral hierarchy of principal submatrices",
            Theorem::PolynomialLemma => "Compressed spectrum as polynomial roots",
        }
    }

    /// Statement in LaTeX
    pub fn formula(&self) -> &'static str {
        match self {
            Theorem::AggregateBounds => concat!(
                r"(r-l+1)\lambda_{l} + (n-1)\sum_{j=l}^{r}\lambda_{j+1} \leq ",
                r"\sum_{k=1}^{n}\sum_{j=l}^{r}\mu_{k,j} \leq ",
                r"(n-1)\sum_{j=l}^{r}\lambda_{j} + (r-l+1)\lambda_{r+1}"
            ),
            Theorem::WeightedProjection => concat!(
                r"\sum_{j=\ell}^{r}\lambda_{j+1} + \sum_{j=\ell}^{r}\frac{w_{j+1}}{L_{r+1}}(\lambda_{\ell}-\lambda_{j+1}) ",
                r"\leq \sum_{j=\ell}^{r}\mu_j \leq ",
                r"\sum_{j=\ell}^{r}\lambda_{j} - \sum_{j=\ell}^{r}\frac{w_j}{U_{\ell}}(\lambda_{j}-\lambda_{r+1})"
            ),
            Theorem::Hierarchy => {
                r"\binom{m-1}{k-1} \text{ copies of } X_m(A) \succ \binom{n-k}{m-k} \text{ copies of } X_k(A)"
            }
            Theorem::PolynomialLemma => {
                r"\sum_{i=1}^{n} |\langle u, v_i \rangle|^2 \prod_{j \neq i} (x - \lambda_j) = 0"
            }
        }
    }

    /// Plain-text description of the symbols and the claim
    pub fn summary(&self) -> &'static str {
        match self {
            Theorem::AggregateBounds => {
                "For an n×n Hermitian A with eigenvalues λ₁ ≥ … ≥ λₙ, let μ_{k,j} be the j-th \
                 eigenvalue of A with row and column k deleted. Summed over all k and over a \
                 window j = l..r, these eigenvalues are confined between two expressions in λ."
            }
            Theorem::WeightedProjection => {
                "Compress A onto the orthogonal complement of a unit vector u and let wᵢ be the \
                 squared coordinates of u in A's eigenbasis. The partial sums U_l and L_{r+1} of \
                 the weights sharpen the window bounds on the compressed spectrum μ."
            }
            Theorem::Hierarchy => {
                "Xₘ(A) is the multiset of eigenvalues of every m×m principal submatrix. Replicated \
                 to a common length, the larger-size multiset majorizes the smaller-size one: \
                 its descending prefix sums dominate and the totals agree."
            }
            Theorem::PolynomialLemma => {
                "The eigenvalues of the compression onto u⊥ are exactly the roots of a weighted \
                 polynomial in λ and w. The form has no denominators and holds for repeated \
                 eigenvalues and zero weights alike."
            }
        }
    }
}

impl fmt::Display for Theorem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), self.title())
    }
}

impl FromStr for Theorem {
    type Err = SpectraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bounds" | "aggregate" | "aggregate-bounds" | "1.4" => Ok(Theorem::AggregateBounds),
            "weighted" | "weighted-projection" | "2.2" => Ok(Theorem::WeightedProjection),
            "hierarchy" | "4.1" => Ok(Theorem::Hierarchy),
            "lemma" | "polynomial" | "polynomial-lemma" | "3.1" => Ok(Theorem::PolynomialLemma),
            other => Err(SpectraError::invalid_parameter(
                "theorem",
                format!("unknown theorem '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("bounds".parse::<Theorem>().unwrap(), Theorem::AggregateBounds);
        assert_eq!("Weighted".parse::<Theorem>().unwrap(), Theorem::WeightedProjection);
        assert_eq!("4.1".parse::<Theorem>().unwrap(), Theorem::Hierarchy);
        assert_eq!("polynomial".parse::<Theorem>().unwrap(), Theorem::PolynomialLemma);
        assert!("nonsense".parse::<Theorem>().is_err());
    }

    #[test]
    fn test_every_theorem_has_text() {
        for t in Theorem::ALL {
            assert!(!t.title().is_empty());
            assert!(!t.formula().is_empty());
            assert!(!t.summary().is_empty());
            assert!(t.to_string().starts_with(t.label()));
        }
    }
}
