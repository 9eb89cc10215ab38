use super::args::*;
use crate::exit_codes::SUCCESS;

pub mod aggregate;
pub mod judge;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Judge(args) => judge::run(args).await,
        Command::Aggregate(args) => aggregate::run(args),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(SUCCESS)
        }
    }
}
