//! End-to-end pipeline test: judge a small dataset with scripted judges,
//! aggregate the verdicts, and merge the summary into a results file.

use async_trait::async_trait;
use std::sync::Arc;
use tribunal_core::aggregate::{corpus_plan, summarize_dataset};
use tribunal_core::judge::JudgeService;
use tribunal_core::jury::Strategy;
use tribunal_core::model::{EvalEntry, ModelAnswers, TestSection};
use tribunal_core::providers::JudgeClient;
use tribunal_core::store;

/// Judge that always returns the same critique text.
struct CannedJudge {
    name: String,
    response: String,
}

#[async_trait]
impl JudgeClient for CannedJudge {
    async fn critique(&self, _system: &str, _prompt: &str) -> anyhow::Result<String> {
        Ok(self.response.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn canned(name: &str, correct: u32, ordinal: u32) -> Arc<dyn JudgeClient> {
    let response = format!(
        "The answer looks reasonable overall.\n\n<results1>\n```json\n\
         {{\"Correct\": {correct}, \"Complete\": {correct}, \"Concise\": {ordinal}, \
         \"Helpful\": {ordinal}, \"Honest\": {ordinal}, \"Harmless\": {ordinal}}}\n```\n</results1>"
    );
    Arc::new(CannedJudge {
        name: name.to_string(),
        response,
    })
}

fn dataset(model: &str, tasks: &[&str]) -> Vec<EvalEntry> {
    tasks
        .iter()
        .map(|task| {
            let mut e = EvalEntry::default();
            e.meta.model_name = Some(model.to_string());
            e.meta.task = Some((*task).to_string());
            e.meta.round = 0;
            e.test = TestSection {
                question1: Some("What is the capital of Jordan?".into()),
                answer1: Some("Amman".into()),
                ..Default::default()
            };
            e.model = ModelAnswers {
                answer1: Some("The capital of Jordan is Amman.".into()),
                ..Default::default()
            };
            e
        })
        .collect()
}

#[tokio::test]
async fn judged_dataset_flows_into_the_results_file() {
    let service = JudgeService::new(
        vec![canned("judge-a", 1, 5), canned("judge-b", 1, 3)],
        Strategy::Vote,
    )
    .unwrap();

    let mut entries = dataset("acme/candidate-7b", &["History", "History", "Science"]);
    service.judge_dataset(&mut entries).await;

    for entry in &entries {
        assert_eq!(entry.judge_keys().len(), 2);
        assert!(entry.has_jury());
    }

    // A judged entry must survive the write/read cycle unchanged.
    let serialized = serde_json::to_string_pretty(&entries).unwrap();
    let reloaded: Vec<EvalEntry> = serde_json::from_str(&serialized).unwrap();
    assert_eq!(reloaded, entries);

    let datasets = vec![reloaded];
    let plan = corpus_plan(&datasets).unwrap();
    assert_eq!(plan.expected_judges, vec!["Judge 1", "Judge 2"]);
    assert!(plan.include_jury);

    let summary = summarize_dataset(&datasets[0], &plan).unwrap();
    assert_eq!(summary.meta.success_ratio, 1.0);
    assert_eq!(summary.meta.total_entries, 3);

    // judge-a scored every ordinal 5 -> 1.0 after rescaling.
    let card = &summary.scorecards["judge-a Scores"];
    assert_eq!(card.categories.overall, Some(1.0));
    assert_eq!(card.tasks["History"], Some(1.0));
    assert_eq!(card.tasks["Science"], Some(1.0));

    // Both judges voted Correct, so the jury averages them: ordinals
    // (1.0 + 0.5) / 2, binary criteria 1.0.
    let jury_card = &summary.scorecards["Jury Scores"];
    assert_eq!(jury_card.categories.correctness, Some(1.0));
    assert_eq!(jury_card.categories.helpfulness, Some(0.75));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(store::results_file_name("vote"));

    let mut collection = store::load(&path);
    store::merge(&mut collection, summary.clone());
    store::save(&path, &collection).unwrap();

    // Re-running the same aggregation replaces the row instead of
    // duplicating it.
    let mut collection = store::load(&path);
    store::merge(&mut collection, summary);
    store::save(&path, &collection).unwrap();

    let finished = store::load(&path);
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].model_name(), "acme/candidate-7b");
}
