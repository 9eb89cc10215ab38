//! Judging orchestration: drives the configured judge roster over a dataset
//! and attaches per-judge and jury verdicts to each entry.

mod prompt;

use crate::errors::PipelineError;
use crate::extract::extract_score_block;
use crate::jury::{self, Strategy};
use crate::model::{EvalEntry, Scores, VerdictRecord, JURY_KEY};
use crate::providers::JudgeClient;
use crate::scoring::{normalize::normalize_block, weight::weight_slots};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs a roster of judges over evaluated entries.
///
/// Each entry gets one `Judge <n>` record per judge that returned usable
/// scores, plus a `Jury` consensus record when the roster holds two or more
/// judges. Judge failures are soft: the entry keeps going with the judges
/// that answered.
pub struct JudgeService {
    clients: Vec<Arc<dyn JudgeClient>>,
    strategy: Strategy,
}

impl JudgeService {
    pub fn new(
        clients: Vec<Arc<dyn JudgeClient>>,
        strategy: Strategy,
    ) -> Result<Self, PipelineError> {
        if clients.is_empty() {
            return Err(PipelineError::NoJudges);
        }
        let strategy = strategy.effective(clients.len());
        Ok(Self { clients, strategy })
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Judge a whole dataset in place, entry by entry.
    pub async fn judge_dataset(&self, entries: &mut [EvalEntry]) {
        let total = entries.len();
        info!(
            total,
            judges = self.clients.len(),
            strategy = %self.strategy,
            "judging dataset"
        );
        for (idx, entry) in entries.iter_mut().enumerate() {
            debug!(entry = idx + 1, total, "judging entry");
            self.judge_entry(entry).await;
        }
    }

    /// Judge one entry in place.
    ///
    /// Entries whose prompt cannot be built (missing text, unknown round)
    /// are skipped with a warning and left without verdict records.
    pub async fn judge_entry(&self, entry: &mut EvalEntry) {
        let Some(prompt) = prompt::build_prompt(entry) else {
            warn!(
                model = entry.meta.model_name.as_deref().unwrap_or("?"),
                round = entry.meta.round,
                "entry is missing required fields, skipping"
            );
            return;
        };

        let mut verdicts: Vec<Scores> = Vec::with_capacity(self.clients.len());

        for client in &self.clients {
            let response = match client.critique(&prompt.system, &prompt.user).await {
                Ok(text) => text,
                Err(err) => {
                    warn!(judge = client.name(), error = %err, "judge call failed");
                    continue;
                }
            };

            let Some(scores) = score_response(&response, prompt.slots) else {
                warn!(
                    judge = client.name(),
                    slots = prompt.slots,
                    "judge response carried no usable score blocks"
                );
                continue;
            };

            // Records are numbered over judges that actually produced scores.
            let key = format!("Judge {}", verdicts.len() + 1);
            entry.verdicts.insert(
                key,
                VerdictRecord {
                    judge_name: Some(client.name().to_string()),
                    judge_comments: Some(response),
                    strategy: None,
                    scores: Some(scores.into()),
                },
            );
            verdicts.push(scores);
        }

        if self.clients.len() >= 2 {
            let consensus = jury::aggregate(self.strategy, &verdicts);
            entry.verdicts.insert(
                JURY_KEY.to_string(),
                VerdictRecord {
                    judge_name: None,
                    judge_comments: None,
                    strategy: Some(self.strategy.to_string()),
                    scores: consensus.map(Into::into),
                },
            );
        }
    }
}

/// Extract, normalize, and weight every expected score block from one judge
/// response. A missing block fails the whole response for that judge; a
/// partial two-slot verdict would not be comparable to the others.
fn score_response(response: &str, slots: usize) -> Option<Scores> {
    let mut normalized = Vec::with_capacity(slots);
    for slot in 1..=slots {
        let raw = extract_score_block(response, slot)?;
        normalized.push(normalize_block(&raw));
    }
    weight_slots(&normalized).ok()
}
