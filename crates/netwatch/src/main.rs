mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use netwatch_core::Monitor;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Cli { mut global, command } = cli;
    let cfg = config::load_config_or_default();
    config::apply_defaults(&mut global, &cfg)?;

    match command {
        // Config commands don't need a server
        Command::Config(args) => commands::config_cmd::handle(args, &global, cfg),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "netwatch", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let monitor_config = config::resolve_monitor_config(&global, &cfg)?;
            let monitor = Monitor::new(monitor_config)?;

            tracing::debug!(command = ?cmd, url = %monitor.config().url, "dispatching command");
            commands::dispatch(cmd, &monitor, &global).await
        }
    }
}
