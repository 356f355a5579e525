//! Command dispatch: bridges CLI args -> `Monitor` calls -> output formatting.

pub mod chart;
pub mod config_cmd;
pub mod history;
pub mod live;
pub mod purge;
pub mod util;

use netwatch_core::{HistoryCategory, Monitor};

use crate::cli::{CategoryArg, Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a server-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::History(args) => history::handle(monitor, args, global).await,
        Command::Chart(args) => chart::handle(monitor, args, global).await,
        Command::Purge(args) => purge::handle(monitor, args, global).await,
        Command::Status => live::status(monitor, global).await,
        Command::Devices(args) => live::devices(monitor, args, global).await,
        Command::Traffic => live::traffic(monitor, global).await,
        Command::Speedtest => live::speedtest(monitor, global).await,
        Command::Session(args) => live::session(monitor, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}

pub(crate) fn category(arg: CategoryArg) -> HistoryCategory {
    match arg {
        CategoryArg::Devices => HistoryCategory::Devices,
        CategoryArg::Speedtest => HistoryCategory::Speedtest,
        CategoryArg::Traffic => HistoryCategory::Traffic,
        CategoryArg::Sessions => HistoryCategory::Sessions,
    }
}
