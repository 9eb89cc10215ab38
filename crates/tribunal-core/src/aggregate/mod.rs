//! Dataset-level aggregation: folds a judged dataset into one leaderboard
//! summary per candidate model.
//!
//! Aggregation is corpus-aware: the set of judges every summary reports is
//! the intersection of the judges present across all datasets being merged,
//! so scorecards in one results file are always comparable column for column.

use crate::errors::PipelineError;
use crate::model::{Criterion, EvalEntry, ScoreVector, CRITERIA, JURY_KEY};
use crate::scoring::round4;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Per-category averages for one judge (or the jury) over a dataset.
/// Null means no valid entry contributed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryAverages {
    #[serde(rename = "Correctness")]
    pub correctness: Option<f64>,
    #[serde(rename = "Completeness")]
    pub completeness: Option<f64>,
    #[serde(rename = "Conciseness")]
    pub conciseness: Option<f64>,
    #[serde(rename = "Helpfulness")]
    pub helpfulness: Option<f64>,
    #[serde(rename = "Honesty")]
    pub honesty: Option<f64>,
    #[serde(rename = "Harmlessness")]
    pub harmlessness: Option<f64>,
    #[serde(rename = "3C3H Score")]
    pub overall: Option<f64>,
}

/// One judge's (or the jury's) scorecard inside a model summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JudgeSummary {
    #[serde(rename = "3C3H Scores")]
    pub categories: CategoryAverages,
    /// Per-task averages of the final score, keyed by task name.
    #[serde(rename = "Tasks Scores")]
    pub tasks: BTreeMap<String, Option<f64>>,
}

/// `Meta` block of a model summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryMeta {
    #[serde(rename = "Model Name")]
    pub model_name: String,
    #[serde(rename = "License", default)]
    pub license: Option<serde_json::Value>,
    #[serde(rename = "Revision", default)]
    pub revision: Option<serde_json::Value>,
    #[serde(rename = "Precision", default)]
    pub precision: Option<serde_json::Value>,
    #[serde(rename = "Params", default)]
    pub params: Option<serde_json::Value>,
    #[serde(rename = "Total Entries")]
    pub total_entries: usize,
    #[serde(rename = "Successful Entries")]
    pub successful_entries: usize,
    #[serde(rename = "Failed Entries")]
    pub failed_entries: usize,
    #[serde(rename = "Success Ratio")]
    pub success_ratio: f64,
}

/// One candidate model's leaderboard row: a scorecard per expected judge
/// (keyed `"<judge name> Scores"`, plus `"Jury Scores"`) and run metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelSummary {
    #[serde(flatten)]
    pub scorecards: BTreeMap<String, JudgeSummary>,
    #[serde(rename = "Meta")]
    pub meta: SummaryMeta,
}

impl ModelSummary {
    pub fn model_name(&self) -> &str {
        &self.meta.model_name
    }
}

/// What every summary produced in one aggregation run must report: the
/// record keys common to all datasets, and whether a jury column exists.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusPlan {
    /// Sorted `Judge <n>` keys present in every dataset.
    pub expected_judges: Vec<String>,
    pub include_jury: bool,
}

impl CorpusPlan {
    fn expected_keys(&self) -> impl Iterator<Item = &str> {
        self.expected_judges
            .iter()
            .map(String::as_str)
            .chain(self.include_jury.then_some(JURY_KEY))
    }
}

/// Compute the judge columns shared by every dataset in the corpus.
///
/// Each dataset's judge-key set and jury presence come from its first entry
/// that carries judge records; the plan takes the intersection across
/// datasets, sorted for determinism. The jury column is included only when
/// every dataset reports one.
pub fn corpus_plan(datasets: &[Vec<EvalEntry>]) -> Result<CorpusPlan, PipelineError> {
    let mut common: Option<Vec<String>> = None;
    let mut include_jury = true;

    for entries in datasets {
        let Some(reference) = entries.iter().find(|e| !e.judge_keys().is_empty()) else {
            continue;
        };
        include_jury &= reference.has_jury();
        let keys = reference.judge_keys();
        common = Some(match common {
            None => keys,
            Some(prev) => prev.into_iter().filter(|k| keys.contains(k)).collect(),
        });
    }

    let mut expected_judges = common.ok_or(PipelineError::NoJudgeRecords)?;
    if expected_judges.is_empty() {
        return Err(PipelineError::NoCommonJudges);
    }
    expected_judges.sort();

    Ok(CorpusPlan {
        expected_judges,
        include_jury,
    })
}

/// Summarize one judged dataset into a leaderboard row.
///
/// An entry is valid only when every expected judge (and the jury, when
/// planned) carries a complete score vector; partially judged entries count
/// as failed across the board rather than skewing individual columns.
/// Returns `None` for an empty dataset or one with no model name.
pub fn summarize_dataset(entries: &[EvalEntry], plan: &CorpusPlan) -> Option<ModelSummary> {
    let first = entries.first()?;
    let Some(model_name) = first.meta.model_name.clone() else {
        warn!("dataset has no model name in its first entry, skipping");
        return None;
    };

    let valid: Vec<&EvalEntry> = entries
        .iter()
        .filter(|e| {
            plan.expected_keys().all(|key| {
                e.verdicts
                    .get(key)
                    .and_then(|v| v.scores.as_ref())
                    .map(ScoreVector::is_complete)
                    .unwrap_or(false)
            })
        })
        .collect();

    debug!(
        model = %model_name,
        total = entries.len(),
        valid = valid.len(),
        "summarizing dataset"
    );

    let mut scorecards = BTreeMap::new();
    for key in plan.expected_keys() {
        let display = display_name(first, key);
        scorecards.insert(format!("{display} Scores"), scorecard(&valid, key));
    }

    let total = entries.len();
    let successful = valid.len();
    let success_ratio = if total == 0 {
        0.0
    } else {
        round4(successful as f64 / total as f64)
    };

    Some(ModelSummary {
        scorecards,
        meta: SummaryMeta {
            model_name,
            license: first.meta.license.clone(),
            revision: first.meta.revision.clone(),
            precision: first.meta.precision.clone(),
            params: first.meta.params.clone(),
            total_entries: total,
            successful_entries: successful,
            failed_entries: total - successful,
            success_ratio,
        },
    })
}

/// Scorecard column header for a record key: the judge's own name where the
/// first entry records one, the record key otherwise. The jury is always
/// labeled `Jury`.
fn display_name(first: &EvalEntry, key: &str) -> String {
    if key == JURY_KEY {
        return JURY_KEY.to_string();
    }
    first
        .verdicts
        .get(key)
        .and_then(|v| v.judge_name.clone())
        .unwrap_or_else(|| key.to_string())
}

fn scorecard(valid: &[&EvalEntry], key: &str) -> JudgeSummary {
    let vectors: Vec<&ScoreVector> = valid
        .iter()
        .filter_map(|e| e.verdicts.get(key).and_then(|v| v.scores.as_ref()))
        .collect();

    let mut categories = CategoryAverages::default();
    for criterion in CRITERIA {
        let avg = average(vectors.iter().filter_map(|v| v.get(criterion)));
        let slot = match criterion {
            Criterion::Correct => &mut categories.correctness,
            Criterion::Complete => &mut categories.completeness,
            Criterion::Concise => &mut categories.conciseness,
            Criterion::Helpful => &mut categories.helpfulness,
            Criterion::Honest => &mut categories.honesty,
            Criterion::Harmless => &mut categories.harmlessness,
        };
        *slot = avg;
    }
    categories.overall = average(vectors.iter().filter_map(|v| v.final_score));

    let mut by_task: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for entry in valid {
        let Some(task) = entry.meta.task.clone() else {
            continue;
        };
        let Some(score) = entry
            .verdicts
            .get(key)
            .and_then(|v| v.scores.as_ref())
            .and_then(|s| s.final_score)
        else {
            continue;
        };
        by_task.entry(task).or_default().push(score);
    }
    let tasks = by_task
        .into_iter()
        .map(|(task, scores)| {
            let avg = average(scores.iter().copied());
            (task, avg)
        })
        .collect();

    JudgeSummary { categories, tasks }
}

fn average(values: impl Iterator<Item = f64>) -> Option<f64> {
    let collected: Vec<f64> = values.collect();
    if collected.is_empty() {
        None
    } else {
        Some(round4(
            collected.iter().sum::<f64>() / collected.len() as f64,
        ))
    }
}
