//! `tribunal aggregate`: fold judged datasets into the results file.

use crate::cli::args::AggregateArgs;
use crate::exit_codes::{PARTIAL_FAILURE, SUCCESS};
use crate::fs::judged_files;
use anyhow::Context;
use tracing::{info, warn};
use tribunal_core::aggregate::{corpus_plan, summarize_dataset};
use tribunal_core::model::EvalEntry;
use tribunal_core::store;

pub fn run(args: AggregateArgs) -> anyhow::Result<i32> {
    let files = judged_files(&args.answers_dir)
        .with_context(|| format!("scanning {}", args.answers_dir.display()))?;
    if files.is_empty() {
        info!(dir = %args.answers_dir.display(), "no judged datasets to aggregate");
        return Ok(SUCCESS);
    }

    let mut datasets: Vec<Vec<EvalEntry>> = Vec::with_capacity(files.len());
    let mut skipped = 0usize;
    for path in &files {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                warn!(file = %path.display(), error = %err, "unreadable dataset, skipping");
                skipped += 1;
                continue;
            }
        };
        match serde_json::from_str(&text) {
            Ok(entries) => datasets.push(entries),
            Err(err) => {
                warn!(file = %path.display(), error = %err, "malformed dataset, skipping");
                skipped += 1;
            }
        }
    }
    if datasets.is_empty() {
        anyhow::bail!("every judged dataset in {} is malformed", args.answers_dir.display());
    }

    let plan = corpus_plan(&datasets)?;
    info!(
        judges = plan.expected_judges.len(),
        jury = plan.include_jury,
        "aggregating {} dataset(s)",
        datasets.len()
    );

    let path = args
        .results_dir
        .join(store::results_file_name(&args.strategy.to_string()));
    let mut collection = store::load(&path);
    for dataset in &datasets {
        match summarize_dataset(dataset, &plan) {
            Some(summary) => {
                info!(
                    model = summary.model_name(),
                    ratio = summary.meta.success_ratio,
                    "merging summary"
                );
                store::merge(&mut collection, summary);
            }
            None => skipped += 1,
        }
    }
    store::save(&path, &collection)?;
    info!(file = %path.display(), models = collection.len(), "results file updated");

    Ok(if skipped == 0 { SUCCESS } else { PARTIAL_FAILURE })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tribunal_core::jury::Strategy;

    fn judged_json(model: &str) -> String {
        format!(
            r#"[{{
                "Meta": {{"Model Name": "{model}", "Task": "History", "Round": 0}},
                "Test": {{"Question 1": "q", "Answer 1": "a"}},
                "Model": {{"Answer 1": "m"}},
                "Judge 1": {{
                    "Judge Name": "gpt-4o",
                    "3C3H Scores": {{"Correct": 1, "Complete": 1, "Concise": 0.5,
                                     "Helpful": 1, "Honest": 1, "Harmless": 1,
                                     "Final Score": 0.9167}}
                }}
            }}]"#
        )
    }

    #[test]
    fn unreadable_dataset_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // Invalid UTF-8 makes the read itself fail, before JSON parsing.
        std::fs::write(dir.path().join("bad_judged.json"), [0xff, 0xfe, 0xfd]).unwrap();
        std::fs::write(
            dir.path().join("good_judged.json"),
            judged_json("acme/good"),
        )
        .unwrap();

        let code = run(AggregateArgs {
            answers_dir: dir.path().to_path_buf(),
            results_dir: dir.path().to_path_buf(),
            strategy: Strategy::Vote,
        })
        .unwrap();

        assert_eq!(code, PARTIAL_FAILURE);
        // The readable dataset still made it into the results file.
        let collection = store::load(&dir.path().join(store::results_file_name("vote")));
        assert_eq!(collection.len(), 1);
        assert_eq!(collection[0].model_name(), "acme/good");
    }

    #[test]
    fn malformed_dataset_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad_judged.json"), "{ not json").unwrap();
        std::fs::write(
            dir.path().join("good_judged.json"),
            judged_json("acme/good"),
        )
        .unwrap();

        let code = run(AggregateArgs {
            answers_dir: dir.path().to_path_buf(),
            results_dir: dir.path().to_path_buf(),
            strategy: Strategy::Vote,
        })
        .unwrap();

        assert_eq!(code, PARTIAL_FAILURE);
        let collection = store::load(&dir.path().join(store::results_file_name("vote")));
        assert_eq!(collection.len(), 1);
    }
}
