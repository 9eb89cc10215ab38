//! Validates, coerces, and rescales one raw score block into a normalized
//! 3C3H vector.
//!
//! Judges are noisy: a criterion may arrive as an integer, a list of numbers,
//! a nested mapping, or garbage. The decode into a tagged variant happens
//! exactly once here; downstream stages only ever see plain numbers.

use crate::extract::RawScoreBlock;
use crate::model::{Criterion, Scores, CRITERIA};

/// A raw criterion value after a single shape inspection.
#[derive(Debug, Clone, PartialEq)]
enum RawValue {
    Number(f64),
    /// Numeric members of a list or mapping; non-numeric members dropped.
    Numbers(Vec<f64>),
    Other,
}

impl RawValue {
    fn decode(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(v) => RawValue::Number(v),
                None => RawValue::Other,
            },
            serde_json::Value::Array(items) => {
                RawValue::Numbers(items.iter().filter_map(|v| v.as_f64()).collect())
            }
            serde_json::Value::Object(map) => {
                RawValue::Numbers(map.values().filter_map(|v| v.as_f64()).collect())
            }
            _ => RawValue::Other,
        }
    }

    /// Collapse to a single number: lists and mappings average their numeric
    /// members; an empty or non-numeric value counts as 0.
    fn collapse(self) -> f64 {
        match self {
            RawValue::Number(v) => v,
            RawValue::Numbers(nums) if !nums.is_empty() => {
                nums.iter().sum::<f64>() / nums.len() as f64
            }
            RawValue::Numbers(_) | RawValue::Other => 0.0,
        }
    }
}

/// Normalize one raw score block into a complete 3C3H vector.
///
/// Order matters: coercion, then the zeroing rule, then rescaling, then the
/// block-level final score. A missing criterion key is a raw value of 0.
pub fn normalize_block(raw: &RawScoreBlock) -> Scores {
    let mut coerced = Scores::default();
    for criterion in CRITERIA {
        let value = raw
            .get(criterion.key())
            .map(|v| RawValue::decode(v).collapse())
            .unwrap_or(0.0);
        coerced.set(criterion, value);
    }

    // Zeroing rule: an answer whose core fact is wrong earns nothing on the
    // remaining criteria, per slot, before any weighting.
    if coerced.correct != 1.0 {
        for criterion in CRITERIA {
            if criterion != Criterion::Correct {
                coerced.set(criterion, 0.0);
            }
        }
    }

    let mut normalized = Scores::default();
    for criterion in CRITERIA {
        let value = coerced.get(criterion);
        let scaled = if criterion.is_binary() {
            if value >= 1.0 {
                1.0
            } else {
                0.0
            }
        } else if value >= 1.0 {
            // Native 1-5 domain onto [0,1]. Out-of-range values above 5 are
            // intentionally not clamped.
            (value - 1.0) / 4.0
        } else {
            0.0
        };
        normalized.set(criterion, scaled);
    }
    normalized.final_score = normalized.criterion_mean();
    normalized
}
