//! Sorting, combinatorics and numerical thresholds

mod combinatorics;
mod sorting;

pub use combinatorics::*;
pub use sorting::*;

/// Norm below which a sampled direction is treated as degenerate
pub const MIN_DIRECTION_NORM: f64 = 1e-300;

/// Maximum `|Vᴴu|` accepted from a null-space basis before falling back to QR
pub const COMPLEMENT_ORTHOGONALITY: f64 = 1e-8;
