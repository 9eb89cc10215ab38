//! Leaderboard results file: a JSON array of model summaries, merged
//! idempotently by model name and rewritten atomically.

use crate::aggregate::ModelSummary;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

pub type ResultCollection = Vec<ModelSummary>;

/// Results file name for a jury strategy, e.g. `results__strategy_vote.json`.
pub fn results_file_name(strategy: &str) -> String {
    format!("results__strategy_{strategy}.json")
}

/// Load an existing results file.
///
/// A missing file is a fresh start. A malformed file is treated the same
/// way, with a warning: the next save rewrites it wholesale, so stale junk
/// never blocks an aggregation run.
pub fn load(path: &Path) -> ResultCollection {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(_) => return ResultCollection::new(),
    };
    match serde_json::from_str(&text) {
        Ok(collection) => collection,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "results file is malformed, starting fresh");
            ResultCollection::new()
        }
    }
}

/// Merge a summary into the collection: re-aggregating a model replaces its
/// row in place, a new model appends. Row order is otherwise preserved.
pub fn merge(collection: &mut ResultCollection, summary: ModelSummary) {
    match collection
        .iter_mut()
        .find(|existing| existing.model_name() == summary.model_name())
    {
        Some(row) => {
            info!(model = summary.model_name(), "updating existing results row");
            *row = summary;
        }
        None => {
            info!(model = summary.model_name(), "adding new results row");
            collection.push(summary);
        }
    }
}

/// Write the collection atomically: serialize to a temp file in the target
/// directory, then rename over the destination. A crash mid-write leaves the
/// previous file intact.
pub fn save(path: &Path, collection: &[ModelSummary]) -> anyhow::Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = match dir {
        Some(dir) => tempfile::NamedTempFile::new_in(dir),
        None => tempfile::NamedTempFile::new(),
    }
    .context("creating temporary results file")?;

    let json = serde_json::to_string_pretty(collection)?;
    tmp.write_all(json.as_bytes())
        .context("writing results data")?;
    tmp.as_file().sync_all().context("flushing results data")?;
    tmp.persist(path)
        .with_context(|| format!("replacing results file {}", path.display()))?;
    Ok(())
}
