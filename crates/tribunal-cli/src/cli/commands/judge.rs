//! `tribunal judge`: run the judge roster over every pending answer dataset.

use crate::cli::args::JudgeArgs;
use crate::exit_codes::{PARTIAL_FAILURE, SUCCESS};
use crate::fs::{judged_path, pending_answer_files};
use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn};
use tribunal_core::judge::JudgeService;
use tribunal_core::model::EvalEntry;
use tribunal_core::providers::openai::OpenAiJudge;
use tribunal_core::providers::JudgeClient;

pub async fn run(args: JudgeArgs) -> anyhow::Result<i32> {
    let clients: Vec<Arc<dyn JudgeClient>> = args
        .judges
        .iter()
        .map(|name| {
            OpenAiJudge::from_env(name)
                .map(|judge| Arc::new(judge) as Arc<dyn JudgeClient>)
                .with_context(|| format!("configuring judge {name}"))
        })
        .collect::<anyhow::Result<_>>()?;

    let service = JudgeService::new(clients, args.strategy)?;

    let pending = pending_answer_files(&args.answers_dir)
        .with_context(|| format!("scanning {}", args.answers_dir.display()))?;
    if pending.is_empty() {
        info!(dir = %args.answers_dir.display(), "no pending answer files");
        return Ok(SUCCESS);
    }

    let mut skipped = 0usize;
    for path in &pending {
        info!(file = %path.display(), "judging dataset");

        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                warn!(file = %path.display(), error = %err, "unreadable dataset, skipping");
                skipped += 1;
                continue;
            }
        };
        let mut entries: Vec<EvalEntry> = match serde_json::from_str(&text) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(file = %path.display(), error = %err, "malformed dataset, skipping");
                skipped += 1;
                continue;
            }
        };

        service.judge_dataset(&mut entries).await;

        let out = judged_path(path);
        let json = serde_json::to_string_pretty(&entries)?;
        std::fs::write(&out, json).with_context(|| format!("writing {}", out.display()))?;
        info!(file = %out.display(), entries = entries.len(), "wrote judged dataset");
    }

    Ok(if skipped == 0 { SUCCESS } else { PARTIAL_FAILURE })
}
