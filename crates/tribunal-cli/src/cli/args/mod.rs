use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tribunal_core::jury::Strategy;

#[derive(Parser)]
#[command(
    name = "tribunal",
    version,
    about = "LLM-as-judge evaluation — 3C3H scoring, jury consensus, and leaderboard aggregation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Judge pending answer datasets with a roster of judge models
    Judge(JudgeArgs),
    /// Aggregate judged datasets into the results file
    Aggregate(AggregateArgs),
    Version,
}

#[derive(clap::Args, Debug, Clone)]
pub struct JudgeArgs {
    /// Directory holding `*_answers.json` datasets
    #[arg(long, default_value = ".")]
    pub answers_dir: PathBuf,

    /// Judge model names, comma separated (e.g. "gpt-4o,claude-3-5-sonnet")
    #[arg(long, value_delimiter = ',', required = true)]
    pub judges: Vec<String>,

    /// Jury strategy: average | vote (a single judge ignores this)
    #[arg(long, default_value = "vote")]
    pub strategy: Strategy,
}

#[derive(clap::Args, Debug, Clone)]
pub struct AggregateArgs {
    /// Directory holding `*_judged.json` datasets
    #[arg(long, default_value = ".")]
    pub answers_dir: PathBuf,

    /// Directory the results file is read from and written to
    #[arg(long, default_value = ".")]
    pub results_dir: PathBuf,

    /// Strategy label used in the results file name
    #[arg(long, default_value = "vote")]
    pub strategy: Strategy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn judge_parses_roster_and_strategy() {
        let cli = Cli::try_parse_from([
            "tribunal",
            "judge",
            "--answers-dir",
            "/data",
            "--judges",
            "gpt-4o,claude-3-5-sonnet",
            "--strategy",
            "average",
        ])
        .expect("parse should succeed");

        match cli.cmd {
            Command::Judge(args) => {
                assert_eq!(args.judges, vec!["gpt-4o", "claude-3-5-sonnet"]);
                assert_eq!(args.strategy, Strategy::Average);
            }
            _ => panic!("expected Command::Judge"),
        }
    }

    #[test]
    fn aggregate_defaults_to_vote() {
        let cli = Cli::try_parse_from(["tribunal", "aggregate"]).expect("parse should succeed");
        match cli.cmd {
            Command::Aggregate(args) => assert_eq!(args.strategy, Strategy::Vote),
            _ => panic!("expected Command::Aggregate"),
        }
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        assert!(Cli::try_parse_from([
            "tribunal",
            "judge",
            "--judges",
            "gpt-4o",
            "--strategy",
            "quorum"
        ])
        .is_err());
    }
}
