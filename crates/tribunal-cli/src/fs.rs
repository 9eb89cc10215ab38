//! Dataset file discovery.
//!
//! A dataset of candidate answers lives in `<model>_answers.json`; judging
//! writes `<model>_answers_judged.json` next to it. Discovery is name-based
//! so re-running a half-finished judging pass only picks up the remainder.

use std::path::{Path, PathBuf};

pub const ANSWERS_SUFFIX: &str = "_answers.json";
pub const JUDGED_SUFFIX: &str = "_judged.json";

/// Output path for a judged dataset: `x_answers.json` -> `x_answers_judged.json`.
pub fn judged_path(answers: &Path) -> PathBuf {
    let name = answers
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    answers.with_file_name(format!(
        "{}{JUDGED_SUFFIX}",
        name.trim_end_matches(".json")
    ))
}

/// Answer files in `dir` that have no judged counterpart yet, sorted.
pub fn pending_answer_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut found = files_with_suffix(dir, ANSWERS_SUFFIX)?;
    found.retain(|path| !judged_path(path).exists());
    Ok(found)
}

/// Judged dataset files in `dir`, sorted.
pub fn judged_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    files_with_suffix(dir, JUDGED_SUFFIX)
}

fn files_with_suffix(dir: &Path, suffix: &str) -> anyhow::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_match = path.is_file()
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(suffix));
        if is_match {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}
