//! Typed error taxonomy for the scoring pipeline.
//!
//! Soft failures (a missing score block, an unreadable file) are not errors:
//! they are logged and recovered at the smallest possible unit. Only caller
//! defects and corpus-level absence of data surface through this enum.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Caller defect: an answer set must hold exactly 1 or 2 slots.
    #[error("answer set must contain 1 or 2 slots, got {0}")]
    SlotCount(usize),

    /// A judge service cannot be built without at least one client.
    #[error("no judge clients configured")]
    NoJudges,

    /// Strategy string outside the accepted set.
    #[error("invalid strategy '{0}': valid strategies are 'average' and 'vote'")]
    UnknownStrategy(String),

    /// No judged file contained any judge records; nothing to aggregate.
    #[error("no judge records found in any judged file")]
    NoJudgeRecords,

    /// The judged files expose disjoint judge sets; nothing meaningful to
    /// aggregate across the corpus.
    #[error("no common judges across judged files")]
    NoCommonJudges,
}
