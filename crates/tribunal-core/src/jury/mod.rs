//! Combines per-judge weighted vectors into one consensus vector.
//!
//! The strategy is fixed per run and recorded alongside the consensus so a
//! published scorecard can always be audited back to how it was reached.

use crate::errors::PipelineError;
use crate::model::{Scores, CRITERIA};
use std::fmt;
use std::str::FromStr;

/// Jury aggregation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Exactly one judge configured; its vector is the verdict, no voting.
    SingleJudge,
    /// Arithmetic mean of every criterion and the final score across judges.
    Average,
    /// Majority vote on Correct; ties break toward incorrect.
    Vote,
}

impl Strategy {
    /// Strategy actually in effect for a roster of `judge_count` judges:
    /// a single judge always collapses to `SingleJudge`.
    pub fn effective(self, judge_count: usize) -> Strategy {
        if judge_count == 1 {
            Strategy::SingleJudge
        } else {
            self
        }
    }
}

impl FromStr for Strategy {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "average" => Ok(Strategy::Average),
            "vote" => Ok(Strategy::Vote),
            other => Err(PipelineError::UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::SingleJudge => "SingleJudge",
            Strategy::Average => "average",
            Strategy::Vote => "vote",
        };
        write!(f, "{name}")
    }
}

/// Aggregate the valid per-judge vectors for one item into a consensus.
///
/// Returns `None` when no judge produced a valid vector; the item is then
/// invalid for jury purposes (it may still count toward per-judge stats).
pub fn aggregate(strategy: Strategy, judges: &[Scores]) -> Option<Scores> {
    if judges.is_empty() {
        return None;
    }
    let consensus = match strategy {
        Strategy::SingleJudge => judges[0],
        Strategy::Average => mean_of(judges),
        Strategy::Vote => vote(judges),
    };
    Some(consensus)
}

fn mean_of(judges: &[Scores]) -> Scores {
    let n = judges.len() as f64;
    let mut out = Scores::default();
    for criterion in CRITERIA {
        out.set(
            criterion,
            judges.iter().map(|s| s.get(criterion)).sum::<f64>() / n,
        );
    }
    out.final_score = judges.iter().map(|s| s.final_score).sum::<f64>() / n;
    out
}

/// Majority vote on Correct. Only exact 0/1 values are votes: a fractional
/// weighted Correct (two-slot item with split outcomes) abstains on both
/// sides. Correct must be strictly ahead to win; a win averages the subset
/// of judges that voted Correct, anything else zeroes the consensus.
fn vote(judges: &[Scores]) -> Scores {
    let correct_count = judges.iter().filter(|s| s.correct == 1.0).count();
    let incorrect_count = judges.iter().filter(|s| s.correct == 0.0).count();

    if correct_count > incorrect_count {
        let winners: Vec<Scores> = judges
            .iter()
            .copied()
            .filter(|s| s.correct == 1.0)
            .collect();
        mean_of(&winners)
    } else {
        Scores::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Criterion;

    fn judge(correct: f64, helpful: f64) -> Scores {
        let mut s = Scores::default();
        s.correct = correct;
        s.complete = correct;
        s.concise = helpful / 2.0;
        s.helpful = helpful;
        s.honest = helpful;
        s.harmless = 1.0;
        s.final_score = s.criterion_mean();
        s
    }

    #[test]
    fn single_judge_passes_vector_verbatim() {
        let j = judge(1.0, 0.75);
        let out = aggregate(Strategy::SingleJudge, &[j]).unwrap();
        assert_eq!(out, j);
    }

    #[test]
    fn average_of_final_scores_equals_mean() {
        let judges = [judge(1.0, 1.0), judge(1.0, 0.5), judge(0.0, 0.0)];
        let out = aggregate(Strategy::Average, &judges).unwrap();
        let expected = judges.iter().map(|j| j.final_score).sum::<f64>() / 3.0;
        assert!((out.final_score - expected).abs() < 1e-12);
        let expected_helpful = judges.iter().map(|j| j.helpful).sum::<f64>() / 3.0;
        assert!((out.helpful - expected_helpful).abs() < 1e-12);
    }

    #[test]
    fn vote_majority_averages_only_correct_judges() {
        // Correct votes [1, 1, 0]: majority says correct, consensus is the
        // plain average of the two correct judges only.
        let a = judge(1.0, 1.0);
        let b = judge(1.0, 0.5);
        let c = judge(0.0, 0.0);
        let out = aggregate(Strategy::Vote, &[a, b, c]).unwrap();
        assert_eq!(out.correct, 1.0);
        assert!((out.helpful - 0.75).abs() < 1e-12);
        let expected_final = (a.final_score + b.final_score) / 2.0;
        assert!((out.final_score - expected_final).abs() < 1e-12);
    }

    #[test]
    fn vote_tie_breaks_toward_incorrect() {
        // Two judges split [1, 0]: not strictly greater, all-zero consensus.
        let out = aggregate(Strategy::Vote, &[judge(1.0, 1.0), judge(0.0, 0.0)]).unwrap();
        for criterion in CRITERIA {
            assert_eq!(out.get(criterion), 0.0);
        }
        assert_eq!(out.final_score, 0.0);
    }

    #[test]
    fn fractional_correct_abstains_from_the_vote() {
        // A two-slot item can weight Correct to 2/3; that judge votes on
        // neither side, so one clean correct vote wins 1-0.
        let mut fractional = judge(1.0, 1.0);
        fractional.set(Criterion::Correct, 2.0 / 3.0);
        let clean = judge(1.0, 0.5);
        let out = aggregate(Strategy::Vote, &[fractional, clean]).unwrap();
        assert_eq!(out, clean);
    }

    #[test]
    fn no_judges_yields_no_consensus() {
        assert!(aggregate(Strategy::Vote, &[]).is_none());
    }

    #[test]
    fn strategy_parsing_and_display() {
        assert_eq!("average".parse::<Strategy>().unwrap(), Strategy::Average);
        assert_eq!("VOTE".parse::<Strategy>().unwrap(), Strategy::Vote);
        assert!("quorum".parse::<Strategy>().is_err());
        assert_eq!(Strategy::Vote.effective(1), Strategy::SingleJudge);
        assert_eq!(Strategy::Vote.effective(3), Strategy::Vote);
        assert_eq!(Strategy::SingleJudge.to_string(), "SingleJudge");
    }
}
