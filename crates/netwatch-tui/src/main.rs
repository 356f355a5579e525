//! `netwatch-tui`: terminal dashboard for network monitoring history.
//!
//! One screen with category tabs, a window selector, the filtered record
//! table, and a line chart of the projected series. Logs go to a file
//! (default `/tmp/netwatch-tui.log`) so they never corrupt the terminal.

mod action;
mod app;
mod component;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use netwatch_config::{Config, DEFAULT_API_URL, Profile, parse_window, profile_to_monitor_config};
use netwatch_core::{Monitor, MonitorConfig, Selection, TimeWindow, TlsVerification};

use crate::app::App;

/// Terminal dashboard for network monitoring history.
#[derive(Parser, Debug)]
#[command(name = "netwatch-tui", version, about)]
struct Cli {
    /// Profile from the shared netwatch config file
    #[arg(short = 'p', long, env = "NETWATCH_PROFILE")]
    profile: Option<String>,

    /// Monitoring server URL (overrides the profile)
    #[arg(short = 'u', long, env = "NETWATCH_API_URL")]
    api_url: Option<String>,

    /// Accept self-signed TLS certificates
    #[arg(short = 'k', long)]
    insecure: bool,

    /// Starting time window (all, 5min, 30min, 1h, 1week, 1month)
    #[arg(short = 'w', long, value_parser = parse_window)]
    window: Option<TimeWindow>,

    /// Re-fetch the current category on this period (e.g. 30s, 5m)
    #[arg(long, value_parser = humantime::parse_duration)]
    refresh: Option<Duration>,

    /// Log file path
    #[arg(long, default_value = "/tmp/netwatch-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-based tracing. Returns a guard that must live until exit so the
/// non-blocking writer flushes.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("netwatch_tui={log_level},netwatch_core={log_level}"))
    });

    let log_dir = cli
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("netwatch-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// `--api-url` > named or default profile > hosted server.
fn monitor_config(cli: &Cli, cfg: &Config) -> Result<MonitorConfig> {
    let mut config = if let Some(ref url) = cli.api_url {
        profile_to_monitor_config(&Profile::new(url.clone()), cfg)?
    } else {
        match cfg.profile(cli.profile.as_deref()) {
            Ok((name, profile)) => {
                info!(profile = name, "using config profile");
                profile_to_monitor_config(profile, cfg)?
            }
            // An explicitly requested profile must exist.
            Err(e) if cli.profile.is_some() => return Err(e.into()),
            Err(_) => profile_to_monitor_config(&Profile::new(DEFAULT_API_URL), cfg)?,
        }
    };

    if cli.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks go in before the terminal is touched.
    tui::install_hooks()?;
    let _log_guard = setup_tracing(&cli);

    let cfg = netwatch_config::load_config_or_default();
    let config = monitor_config(&cli, &cfg)?;
    let window = match cli.window {
        Some(window) => window,
        None => cfg.default_window()?,
    };

    info!(url = %config.url, %window, refresh = ?cli.refresh, "starting netwatch-tui");

    let monitor = Monitor::new(config)?;
    let selection = Selection {
        window,
        ..Selection::default()
    };
    App::new(monitor, selection, cli.refresh).run().await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["netwatch-tui"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn flag_url_beats_profile() {
        let mut cfg = Config::default();
        cfg.profiles
            .insert("default".into(), Profile::new("http://10.0.0.1:5000"));
        let config = monitor_config(&parse(&["-u", "http://192.168.0.2:5000"]), &cfg).unwrap();
        assert_eq!(config.url.as_str(), "http://192.168.0.2:5000/");
    }

    #[test]
    fn falls_back_to_hosted_server() {
        let config = monitor_config(&parse(&[]), &Config::default()).unwrap();
        assert_eq!(
            config.url.as_str().trim_end_matches('/'),
            DEFAULT_API_URL
        );
    }

    #[test]
    fn missing_named_profile_is_an_error() {
        assert!(monitor_config(&parse(&["-p", "office"]), &Config::default()).is_err());
    }

    #[test]
    fn parses_window_and_refresh() {
        let cli = parse(&["-w", "1h", "--refresh", "30s", "-k"]);
        assert_eq!(cli.window, Some(TimeWindow::LastHour));
        assert_eq!(cli.refresh, Some(Duration::from_secs(30)));

        let config = monitor_config(&cli, &Config::default()).unwrap();
        assert_eq!(config.tls, TlsVerification::DangerAcceptInvalid);
    }
}
