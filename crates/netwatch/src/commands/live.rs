//! Live reading handlers: status, device discovery, traffic, speed test,
//! and usage sessions.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use netwatch_core::display::{amount, text};
use netwatch_core::{
    HealthStatus, MachineInfo, Monitor, SessionFinished, SessionStarted, SpeedtestResult,
    TrafficSnapshot,
};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts, SessionArgs, SessionCommand};
use crate::error::CliError;
use crate::output::{self, render_detail};

use super::history::{device_line, device_row};

// ── Status ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct StatusReport {
    url: String,
    health: HealthStatus,
    machine: Option<MachineInfo>,
}

pub async fn status(monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    let health = monitor.health().await?;
    // Older servers have no /maquina endpoint; health alone is enough.
    let machine = match monitor.machine().await {
        Ok(info) => Some(info),
        Err(e) => {
            tracing::debug!(error = %e, "machine info unavailable");
            None
        }
    };

    let report = StatusReport {
        url: monitor.config().url.to_string(),
        health,
        machine,
    };

    let out = output::render_single(
        &global.output_format(),
        &report,
        |r| {
            let mut pairs = vec![
                ("Server", r.url.clone()),
                ("Status", text(r.health.status.as_ref())),
                ("Message", text(r.health.message.as_ref())),
            ];
            if let Some(ref m) = r.machine {
                pairs.push(("Host", text(m.hostname.as_ref())));
                pairs.push(("IP", text(m.ip.as_ref())));
                pairs.push(("MAC", text(m.mac.as_ref())));
            }
            render_detail(&pairs)
        },
        |r| text(r.health.status.as_ref()),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Devices ─────────────────────────────────────────────────────────

pub async fn devices(
    monitor: &Monitor,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let devices = match args.command {
        DevicesCommand::Scan => {
            let spinner = spinner("Scanning network...", global.quiet);
            let found = monitor.scan_devices().await;
            spinner.finish_and_clear();
            found?
        }
        DevicesCommand::Subnet => monitor.subnet_devices().await?,
    };

    let color = output::should_color(&global.color_mode());
    let out = output::render_list(
        &global.output_format(),
        &devices,
        |d| device_row(d, color),
        device_line,
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Traffic ─────────────────────────────────────────────────────────

pub async fn traffic(monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    let snapshot = monitor.current_traffic().await?;
    let out = output::render_single(
        &global.output_format(),
        &snapshot,
        traffic_detail,
        |t| {
            format!(
                "{}\t{}\t{}",
                amount(t.download_mb),
                amount(t.upload_mb),
                amount(t.total_mb)
            )
        },
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn traffic_detail(t: &TrafficSnapshot) -> String {
    render_detail(&[
        ("Time", text(t.taken_at.as_ref())),
        ("Device", text(t.device_ip.as_ref())),
        ("Download", format!("{} MB", amount(t.download_mb))),
        ("Upload", format!("{} MB", amount(t.upload_mb))),
        ("Total", format!("{} MB", amount(t.total_mb))),
    ])
}

// ── Speed test ──────────────────────────────────────────────────────

pub async fn speedtest(monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    let spinner = spinner("Running speed test (this takes a while)...", global.quiet);
    let result = monitor.run_speedtest().await;
    spinner.finish_and_clear();
    let result = result?;

    let out = output::render_single(
        &global.output_format(),
        &result,
        speedtest_detail,
        |r| {
            format!(
                "{}\t{}\t{}",
                amount(r.download_mbps),
                amount(r.upload_mbps),
                amount(r.ping_ms)
            )
        },
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn speedtest_detail(r: &SpeedtestResult) -> String {
    render_detail(&[
        ("Time", text(r.timestamp.as_ref())),
        ("Download", format!("{} Mbps", amount(r.download_mbps))),
        ("Upload", format!("{} Mbps", amount(r.upload_mbps))),
        ("Ping", format!("{} ms", amount(r.ping_ms))),
    ])
}

/// A stderr spinner, hidden when quiet or when stderr is not a terminal.
fn spinner(message: &'static str, quiet: bool) -> ProgressBar {
    if quiet || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} {elapsed}") {
        bar.set_style(style);
    }
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

// ── Sessions ────────────────────────────────────────────────────────

pub async fn session(
    monitor: &Monitor,
    args: SessionArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = global.output_format();
    let out = match args.command {
        SessionCommand::Start => {
            let started = monitor.start_session().await?;
            output::render_single(&format, &started, started_detail, |s| {
                text(s.started_at.as_ref())
            })?
        }
        SessionCommand::Stop => {
            let finished = monitor.finish_session().await?;
            output::render_single(&format, &finished, finished_detail, |s| {
                amount(s.total_used_mb)
            })?
        }
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

fn started_detail(s: &SessionStarted) -> String {
    render_detail(&[
        ("Status", text(s.status.as_ref())),
        ("Started", text(s.started_at.as_ref())),
        ("Download", format!("{} MB", amount(s.initial_download_mb))),
        ("Upload", format!("{} MB", amount(s.initial_upload_mb))),
    ])
}

fn finished_detail(s: &SessionFinished) -> String {
    render_detail(&[
        ("Status", text(s.status.as_ref())),
        ("Started", text(s.started_at.as_ref())),
        ("Ended", text(s.ended_at.as_ref())),
        ("Download", format!("{} MB", amount(s.download_used_mb))),
        ("Upload", format!("{} MB", amount(s.upload_used_mb))),
        ("Total", format!("{} MB", amount(s.total_used_mb))),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traffic_detail_lists_units() {
        let out = traffic_detail(&TrafficSnapshot {
            download_mb: Some(12.5),
            upload_mb: Some(1.25),
            total_mb: Some(13.75),
            ..TrafficSnapshot::default()
        });
        assert!(out.contains("Download  12.50 MB"));
        assert!(out.contains("Device    -"));
    }

    #[test]
    fn finished_session_plain_line_is_total() {
        let finished = SessionFinished {
            total_used_mb: Some(42.0),
            ..SessionFinished::default()
        };
        assert!(finished_detail(&finished).contains("Total     42.00 MB"));
    }
}
