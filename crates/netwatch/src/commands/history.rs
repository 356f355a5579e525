//! History command handlers.

use chrono::Local;
use tabled::Tabled;

use netwatch_core::display::{amount, stamp, text};
use netwatch_core::{
    DeviceRecord, HistoryCategory, HistoryRecord, Monitor, SessionRecord, SpeedtestRecord,
    TrafficRecord, filter_with_table,
};

use crate::cli::{GlobalOpts, HistoryArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::category;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "Vendor")]
    vendor: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Last Checked")]
    last_checked: String,
}

#[derive(Tabled)]
struct SpeedtestRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Down (Mbps)")]
    download: String,
    #[tabled(rename = "Up (Mbps)")]
    upload: String,
    #[tabled(rename = "Ping (ms)")]
    ping: String,
    #[tabled(rename = "Total (Mbps)")]
    total: String,
}

#[derive(Tabled)]
struct TrafficRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Down (MB)")]
    download: String,
    #[tabled(rename = "Up (MB)")]
    upload: String,
    #[tabled(rename = "Total (MB)")]
    total: String,
}

#[derive(Tabled)]
struct SessionRow {
    #[tabled(rename = "Started")]
    started: String,
    #[tabled(rename = "Ended")]
    ended: String,
    #[tabled(rename = "Down (MB)")]
    download: String,
    #[tabled(rename = "Up (MB)")]
    upload: String,
    #[tabled(rename = "Total (MB)")]
    total: String,
}

pub(crate) fn device_row(d: &DeviceRecord, color: bool) -> impl Tabled + use<> {
    DeviceRow {
        ip: text(d.ip.as_ref()),
        mac: text(d.mac.as_ref()),
        hostname: text(d.hostname.as_ref()),
        vendor: text(d.vendor.as_ref()),
        kind: text(d.kind.as_ref()),
        state: output::online_label(d.online, color),
        last_checked: stamp(d.last_checked.as_ref()),
    }
}

pub(crate) fn device_line(d: &DeviceRecord) -> String {
    format!(
        "{}\t{}\t{}",
        d.ip.as_deref().unwrap_or("-"),
        d.mac.as_deref().unwrap_or("-"),
        if d.online { "online" } else { "offline" }
    )
}

fn speedtest_row(s: &SpeedtestRecord) -> SpeedtestRow {
    SpeedtestRow {
        time: stamp(s.taken_at.as_ref()),
        download: amount(s.download_mbps),
        upload: amount(s.upload_mbps),
        ping: amount(s.ping_ms),
        total: amount(s.total_mb()),
    }
}

fn traffic_row(t: &TrafficRecord) -> TrafficRow {
    TrafficRow {
        time: stamp(t.taken_at.as_ref()),
        download: amount(t.download_mb),
        upload: amount(t.upload_mb),
        total: amount(t.total_mb()),
    }
}

fn session_row(s: &SessionRecord) -> SessionRow {
    SessionRow {
        started: stamp(s.started_at.as_ref()),
        ended: stamp(s.ended_at.as_ref()),
        download: amount(s.download_used_mb),
        upload: amount(s.upload_used_mb),
        total: amount(s.total_used_mb),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    monitor: &Monitor,
    args: HistoryArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let category = category(args.category);
    let records = if args.strict {
        monitor.try_fetch_history(category).await?
    } else {
        monitor.fetch_history(category).await
    };

    let window = config::time_window(global);
    let now = Local::now().naive_local();
    let visible = filter_with_table(monitor.windows(), &records, window, now);
    tracing::debug!(
        %category,
        %window,
        fetched = records.len(),
        visible = visible.len(),
        "history filtered"
    );

    let out = render(category, &visible, global)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn render(
    category: HistoryCategory,
    records: &[HistoryRecord],
    global: &GlobalOpts,
) -> Result<String, CliError> {
    let format = global.output_format();
    let color = output::should_color(&global.color_mode());

    match category {
        HistoryCategory::Devices => {
            let rows: Vec<&DeviceRecord> = records
                .iter()
                .filter_map(|r| match r {
                    HistoryRecord::Device(d) => Some(d),
                    _ => None,
                })
                .collect();
            output::render_list(&format, &rows, |d| device_row(d, color), |d| device_line(d))
        }
        HistoryCategory::Speedtest => {
            let rows: Vec<&SpeedtestRecord> = records
                .iter()
                .filter_map(|r| match r {
                    HistoryRecord::Speedtest(s) => Some(s),
                    _ => None,
                })
                .collect();
            output::render_list(
                &format,
                &rows,
                |s| speedtest_row(s),
                |s| {
                    format!(
                        "{}\t{}\t{}\t{}\t{}",
                        stamp(s.taken_at.as_ref()),
                        amount(s.download_mbps),
                        amount(s.upload_mbps),
                        amount(s.ping_ms),
                        amount(s.total_mb())
                    )
                },
            )
        }
        HistoryCategory::Traffic => {
            let rows: Vec<&TrafficRecord> = records
                .iter()
                .filter_map(|r| match r {
                    HistoryRecord::Traffic(t) => Some(t),
                    _ => None,
                })
                .collect();
            output::render_list(
                &format,
                &rows,
                |t| traffic_row(t),
                |t| {
                    format!(
                        "{}\t{}\t{}\t{}",
                        stamp(t.taken_at.as_ref()),
                        amount(t.download_mb),
                        amount(t.upload_mb),
                        amount(t.total_mb())
                    )
                },
            )
        }
        HistoryCategory::Sessions => {
            let rows: Vec<&SessionRecord> = records
                .iter()
                .filter_map(|r| match r {
                    HistoryRecord::Session(s) => Some(s),
                    _ => None,
                })
                .collect();
            output::render_list(
                &format,
                &rows,
                |s| session_row(s),
                |s| {
                    format!(
                        "{}\t{}\t{}",
                        stamp(s.started_at.as_ref()),
                        stamp(s.ended_at.as_ref()),
                        amount(s.total_used_mb)
                    )
                },
            )
        }
    }
}
