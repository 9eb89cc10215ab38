//! Core library for the tribunal evaluation pipeline.
//!
//! The pipeline judges a candidate model's answers with a roster of LLM
//! judges on the 3C3H rubric (Correct, Complete, Concise, Helpful, Honest,
//! Harmless), folds the per-judge verdicts into a jury consensus, and
//! aggregates judged datasets into a leaderboard results file.
//!
//! The stages are independent: [`judge`] attaches verdicts to entries,
//! [`aggregate`] summarizes judged datasets, [`store`] merges summaries into
//! the results file. The CLI wires them together.

pub mod aggregate;
pub mod errors;
pub mod extract;
pub mod judge;
pub mod jury;
pub mod model;
pub mod providers;
pub mod scoring;
pub mod store;
