//! Domain types shared across the pipeline: the 3C3H criteria, score
//! vectors, and the judged-dataset entry schema.
//!
//! Field names follow the on-disk artifact schema (`"3C3H Scores"`,
//! `"Judge Name"`, ...) so entries round-trip byte-compatibly with files
//! produced by earlier runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One of the six 3C3H evaluation criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    Correct,
    Complete,
    Concise,
    Helpful,
    Honest,
    Harmless,
}

/// All criteria, in canonical rubric order.
pub const CRITERIA: [Criterion; 6] = [
    Criterion::Correct,
    Criterion::Complete,
    Criterion::Concise,
    Criterion::Helpful,
    Criterion::Honest,
    Criterion::Harmless,
];

impl Criterion {
    /// Short key used inside score blocks and `3C3H Scores` maps.
    pub fn key(self) -> &'static str {
        match self {
            Criterion::Correct => "Correct",
            Criterion::Complete => "Complete",
            Criterion::Concise => "Concise",
            Criterion::Helpful => "Helpful",
            Criterion::Honest => "Honest",
            Criterion::Harmless => "Harmless",
        }
    }

    /// Long category name used in model summaries.
    pub fn category(self) -> &'static str {
        match self {
            Criterion::Correct => "Correctness",
            Criterion::Complete => "Completeness",
            Criterion::Concise => "Conciseness",
            Criterion::Helpful => "Helpfulness",
            Criterion::Honest => "Honesty",
            Criterion::Harmless => "Harmlessness",
        }
    }

    /// Correct and Complete are 0/1; the rest are ordinal 1-5 in raw form.
    pub fn is_binary(self) -> bool {
        matches!(self, Criterion::Correct | Criterion::Complete)
    }
}

/// A fully computed, normalized score set for one judge on one entry.
///
/// Every value lies in [0,1] for raw inputs inside the documented ranges;
/// `final_score` is derived from the six criteria, never stored raw.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scores {
    pub correct: f64,
    pub complete: f64,
    pub concise: f64,
    pub helpful: f64,
    pub honest: f64,
    pub harmless: f64,
    pub final_score: f64,
}

impl Scores {
    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Correct => self.correct,
            Criterion::Complete => self.complete,
            Criterion::Concise => self.concise,
            Criterion::Helpful => self.helpful,
            Criterion::Honest => self.honest,
            Criterion::Harmless => self.harmless,
        }
    }

    pub fn set(&mut self, criterion: Criterion, value: f64) {
        match criterion {
            Criterion::Correct => self.correct = value,
            Criterion::Complete => self.complete = value,
            Criterion::Concise => self.concise = value,
            Criterion::Helpful => self.helpful = value,
            Criterion::Honest => self.honest = value,
            Criterion::Harmless => self.harmless = value,
        }
    }

    /// Arithmetic mean of the six criteria (the definition of FinalScore).
    pub fn criterion_mean(&self) -> f64 {
        CRITERIA.iter().map(|c| self.get(*c)).sum::<f64>() / CRITERIA.len() as f64
    }

    pub fn to_vector(self) -> ScoreVector {
        ScoreVector {
            correct: Some(self.correct),
            complete: Some(self.complete),
            concise: Some(self.concise),
            helpful: Some(self.helpful),
            honest: Some(self.honest),
            harmless: Some(self.harmless),
            final_score: Some(self.final_score),
        }
    }
}

/// File-facing 3C3H score vector. Any value may be null in artifacts written
/// by partially failed runs; a vector only feeds aggregation when complete.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreVector {
    #[serde(rename = "Correct", default)]
    pub correct: Option<f64>,
    #[serde(rename = "Complete", default)]
    pub complete: Option<f64>,
    #[serde(rename = "Concise", default)]
    pub concise: Option<f64>,
    #[serde(rename = "Helpful", default)]
    pub helpful: Option<f64>,
    #[serde(rename = "Honest", default)]
    pub honest: Option<f64>,
    #[serde(rename = "Harmless", default)]
    pub harmless: Option<f64>,
    #[serde(rename = "Final Score", default)]
    pub final_score: Option<f64>,
}

impl ScoreVector {
    pub fn get(&self, criterion: Criterion) -> Option<f64> {
        match criterion {
            Criterion::Correct => self.correct,
            Criterion::Complete => self.complete,
            Criterion::Concise => self.concise,
            Criterion::Helpful => self.helpful,
            Criterion::Honest => self.honest,
            Criterion::Harmless => self.harmless,
        }
    }

    /// True when all six criteria and the final score are present.
    pub fn is_complete(&self) -> bool {
        self.to_scores().is_some()
    }

    pub fn to_scores(&self) -> Option<Scores> {
        Some(Scores {
            correct: self.correct?,
            complete: self.complete?,
            concise: self.concise?,
            helpful: self.helpful?,
            honest: self.honest?,
            harmless: self.harmless?,
            final_score: self.final_score?,
        })
    }
}

impl From<Scores> for ScoreVector {
    fn from(scores: Scores) -> Self {
        scores.to_vector()
    }
}

/// `Meta` section of an evaluated entry. Unknown fields are preserved so a
/// judging pass never loses upstream metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntryMeta {
    #[serde(rename = "Model Name", default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(rename = "License", default, skip_serializing_if = "Option::is_none")]
    pub license: Option<serde_json::Value>,
    #[serde(rename = "Revision", default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<serde_json::Value>,
    #[serde(rename = "Precision", default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<serde_json::Value>,
    #[serde(rename = "Params", default, skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
    #[serde(rename = "Task", default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    /// Conversation shape: 0 = single turn, 1 = refined single answer,
    /// 2 = two independently scored answers.
    #[serde(rename = "Round", default)]
    pub round: i64,
    #[serde(rename = "SN.", default, skip_serializing_if = "Option::is_none")]
    pub sn: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `Test` section: reference question/answer text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TestSection {
    #[serde(rename = "Question 1", default, skip_serializing_if = "Option::is_none")]
    pub question1: Option<String>,
    #[serde(rename = "Answer 1", default, skip_serializing_if = "Option::is_none")]
    pub answer1: Option<String>,
    #[serde(rename = "Question 2", default, skip_serializing_if = "Option::is_none")]
    pub question2: Option<String>,
    #[serde(rename = "Answer 2", default, skip_serializing_if = "Option::is_none")]
    pub answer2: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `Model` section: the candidate model's answers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelAnswers {
    #[serde(rename = "Answer 1", default, skip_serializing_if = "Option::is_none")]
    pub answer1: Option<String>,
    #[serde(rename = "Answer 2", default, skip_serializing_if = "Option::is_none")]
    pub answer2: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One `Judge <n>` or `Jury` record attached to an entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VerdictRecord {
    #[serde(rename = "Judge Name", default, skip_serializing_if = "Option::is_none")]
    pub judge_name: Option<String>,
    #[serde(rename = "Judge Comments", default, skip_serializing_if = "Option::is_none")]
    pub judge_comments: Option<String>,
    #[serde(rename = "Strategy", default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(rename = "3C3H Scores", default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<ScoreVector>,
}

/// Key under which the jury consensus is stored on an entry.
pub const JURY_KEY: &str = "Jury";

/// One evaluated item: a question (or question pair), the reference answers,
/// the candidate answers, and any attached judge/jury verdicts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EvalEntry {
    #[serde(rename = "Meta", default)]
    pub meta: EntryMeta,
    #[serde(rename = "Test", default)]
    pub test: TestSection,
    #[serde(rename = "Model", default)]
    pub model: ModelAnswers,
    /// Dynamic `Judge 1`, `Judge 2`, ... and `Jury` records.
    #[serde(flatten)]
    pub verdicts: BTreeMap<String, VerdictRecord>,
}

impl EvalEntry {
    /// Keys of the judge records present on this entry (`Judge 1`, ...).
    pub fn judge_keys(&self) -> Vec<String> {
        self.verdicts
            .keys()
            .filter(|k| k.starts_with("Judge "))
            .cloned()
            .collect()
    }

    pub fn has_jury(&self) -> bool {
        self.verdicts.contains_key(JURY_KEY)
    }
}
