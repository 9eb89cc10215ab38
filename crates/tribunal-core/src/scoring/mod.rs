//! Score normalization and answer-set weighting.
//!
//! `normalize` turns one raw judge score block into a canonical [0,1] vector;
//! `weight` folds the per-slot vectors of a multi-answer item into a single
//! vector per judge.

pub mod normalize;
pub mod weight;

pub use normalize::normalize_block;
pub use weight::weight_slots;

/// Round to 4 decimal digits, the precision of every persisted score.
pub(crate) fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
