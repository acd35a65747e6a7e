//! Random and adversarial inputs for the checkers.
//!
//! Every draw takes the generator explicitly, so a seeded `StdRng` reproduces
//! a stress scenario exactly and concurrent callers never share hidden state.

use crate::config::StressProfile;
use crate::utils::sort_descending;
use nalgebra::{DMatrix, DVector};
use num_complex::Complex64;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

/// Value distribution for stress-mode spectra
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpectrumValues {
    /// Uniform on `(-bound, bound)`; repeats only when forced
    Continuous,
    /// Integers in `[-bound, bound)`; repeats occur naturally as well
    Integer,
}

/// Draw `A + Aᴴ` where `A` has i.i.d. standard normal real and imaginary parts.
///
/// The result is Hermitian by construction, not by test.
pub fn random_hermitian<R: Rng + ?Sized>(rng: &mut R, n: usize) -> DMatrix<Complex64> {
    let a = DMatrix::from_fn(n, n, |_, _| {
        Complex64::new(rng.sample(StandardNormal), rng.sample(StandardNormal))
    });
    &a + a.adjoint()
}

/// Draw a standard normal direction and scale it to unit Euclidean norm.
///
/// With `complex = false` every imaginary part is zero.
pub fn random_unit_vector<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    complex: bool,
) -> DVector<Complex64> {
    let mut u = DVector::from_fn(n, |_, _| {
        let re: f64 = rng.sample(StandardNormal);
        let im: f64 = if complex { rng.sample(StandardNormal) } else { 0.0 };
        Complex64::new(re, im)
    });
    // A zero-norm draw has probability zero under a continuous distribution.
    let norm = u.norm();
    if norm > 0.0 {
        u.unscale_mut(norm);
    }
    u
}

/// Draw a spectrum of length `n`, sorted descending, that is likely to
/// contain repeated eigenvalues.
///
/// With probability `profile.duplicate_probability` (and `n >= 3`) the draw at
/// a random position is copied into the next one, and for `n > 3` into the one
/// after that as well.
pub fn degenerate_spectrum<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    profile: &StressProfile,
    values: SpectrumValues,
) -> Vec<f64> {
    let bound = profile.value_bound;
    let mut raw: Vec<f64> = (0..n)
        .map(|_| match values {
            SpectrumValues::Continuous => {
                let b = f64::from(bound);
                rng.gen_range(-b..b)
            }
            SpectrumValues::Integer => f64::from(rng.gen_range(-bound..bound)),
        })
        .collect();

    if n >= 3 && rng.gen::<f64>() < profile.duplicate_probability {
        let at = rng.gen_range(0..n - 2);
        raw[at + 1] = raw[at];
        if n > 3 {
            raw[at + 2] = raw[at];
        }
    }

    sort_descending(&mut raw);
    raw
}

/// Draw a real unit vector whose squared entries stress weight denominators.
///
/// With probability `zero_weight_probability` one coordinate is set to exactly
/// zero; otherwise, with probability `tiny_weight_probability`, one coordinate
/// is set to `tiny_weight`. The vector is renormalized afterwards.
pub fn adversarial_weight_vector<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    profile: &StressProfile,
) -> DVector<f64> {
    let mut u = DVector::from_fn(n, |_, _| rng.sample::<f64, _>(StandardNormal));

    if n > 0 {
        let roll = rng.gen::<f64>();
        if roll < profile.zero_weight_probability {
            let at = rng.gen_range(0..n);
            u[at] = 0.0;
        } else if roll < profile.zero_weight_probability + profile.tiny_weight_probability {
            let at = rng.gen_range(0..n);
            u[at] = profile.tiny_weight;
        }
    }

    let norm = u.norm();
    if norm > 0.0 {
        u.unscale_mut(norm);
    }
    u
}
