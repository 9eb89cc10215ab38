//! Folds the per-slot normalized vectors of one judge on one item into a
//! single weighted vector.

use super::round4;
use crate::errors::PipelineError;
use crate::model::{Scores, CRITERIA};

/// Slot weights: a lone answer stands alone; in two-answer items the first
/// answer counts twice as heavily as the follow-up, which is judged relative
/// to an already-scored first turn.
fn slot_weights(len: usize) -> Result<&'static [f64], PipelineError> {
    match len {
        1 => Ok(&[1.0]),
        2 => Ok(&[2.0, 1.0]),
        n => Err(PipelineError::SlotCount(n)),
    }
}

/// Combine 1 or 2 per-slot vectors into one weighted vector.
///
/// Weighting is applied per criterion; the final score is recomputed from the
/// weighted criteria afterwards, not averaged across slots. Any other slot
/// count is a caller defect and fails loudly.
pub fn weight_slots(slots: &[Scores]) -> Result<Scores, PipelineError> {
    let weights = slot_weights(slots.len())?;
    let total_weight: f64 = weights.iter().sum();

    let mut weighted = Scores::default();
    for criterion in CRITERIA {
        let sum: f64 = slots
            .iter()
            .zip(weights)
            .map(|(slot, w)| slot.get(criterion) * w)
            .sum();
        weighted.set(criterion, round4(sum / total_weight));
    }
    weighted.final_score = round4(weighted.criterion_mean());
    Ok(weighted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Criterion;

    fn uniform(value: f64) -> Scores {
        let mut s = Scores::default();
        for c in CRITERIA {
            s.set(c, value);
        }
        s.final_score = s.criterion_mean();
        s
    }

    #[test]
    fn single_slot_passes_through() {
        let slot = uniform(0.75);
        let out = weight_slots(&[slot]).unwrap();
        for c in CRITERIA {
            assert_eq!(out.get(c), 0.75);
        }
        assert_eq!(out.final_score, 0.75);
    }

    #[test]
    fn two_slots_weight_two_to_one() {
        // Weighting law: (2a + b) / 3 per criterion.
        let mut first = uniform(0.9);
        let second = uniform(0.3);
        first.set(Criterion::Concise, 0.6);
        let out = weight_slots(&[first, second]).unwrap();
        assert_eq!(out.correct, round4((2.0 * 0.9 + 0.3) / 3.0));
        assert_eq!(out.concise, round4((2.0 * 0.6 + 0.3) / 3.0));
    }

    #[test]
    fn final_score_is_mean_of_weighted_criteria() {
        let mut first = uniform(1.0);
        first.set(Criterion::Concise, 0.5);
        let second = uniform(0.0);
        let out = weight_slots(&[first, second]).unwrap();
        let expected = round4(
            CRITERIA
                .iter()
                .map(|c| out.get(*c))
                .sum::<f64>()
                / 6.0,
        );
        assert_eq!(out.final_score, expected);
    }

    #[test]
    fn other_slot_counts_fail_loudly() {
        assert!(matches!(
            weight_slots(&[]),
            Err(PipelineError::SlotCount(0))
        ));
        let s = uniform(1.0);
        assert!(matches!(
            weight_slots(&[s, s, s]),
            Err(PipelineError::SlotCount(3))
        ));
    }
}
