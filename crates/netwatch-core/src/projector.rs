// ── Series projector ──
//
// Turns a filtered record list into the labelled, colored series a chart
// draws. Every series is positionally aligned with the input records.

use crate::model::{
    ChartData, HistoryCategory, HistoryRecord, Series, SeriesColor, SessionRecord,
    SpeedtestRecord, TrafficRecord,
};

fn column<T>(
    records: &[HistoryRecord],
    pick: fn(&HistoryRecord) -> Option<&T>,
    value: fn(&T) -> Option<f64>,
) -> Vec<Option<f64>> {
    records.iter().map(|r| pick(r).and_then(value)).collect()
}

fn speedtest(r: &HistoryRecord) -> Option<&SpeedtestRecord> {
    match r {
        HistoryRecord::Speedtest(s) => Some(s),
        _ => None,
    }
}

fn traffic(r: &HistoryRecord) -> Option<&TrafficRecord> {
    match r {
        HistoryRecord::Traffic(t) => Some(t),
        _ => None,
    }
}

fn session(r: &HistoryRecord) -> Option<&SessionRecord> {
    match r {
        HistoryRecord::Session(s) => Some(s),
        _ => None,
    }
}

/// Project `records` into the series for `category`.
///
/// Records of another category contribute gaps. The device series is a
/// running count (1, 2, 3, ...) since device rows carry no measurement.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn project(category: HistoryCategory, records: &[HistoryRecord]) -> Vec<Series> {
    match category {
        HistoryCategory::Speedtest => vec![
            Series::new(
                "Download (Mbps)",
                SeriesColor::Blue,
                column(records, speedtest, |s| s.download_mbps),
            ),
            Series::new(
                "Upload (Mbps)",
                SeriesColor::Green,
                column(records, speedtest, |s| s.upload_mbps),
            ),
            Series::new(
                "Ping (ms)",
                SeriesColor::Gray,
                column(records, speedtest, |s| s.ping_ms),
            ),
        ],
        HistoryCategory::Traffic => vec![
            Series::new(
                "Download (MB)",
                SeriesColor::Blue,
                column(records, traffic, |t| t.download_mb),
            ),
            Series::new(
                "Upload (MB)",
                SeriesColor::Green,
                column(records, traffic, |t| t.upload_mb),
            ),
            Series::new(
                "Total (MB)",
                SeriesColor::Orange,
                column(records, traffic, TrafficRecord::total_mb),
            ),
        ],
        HistoryCategory::Sessions => vec![
            Series::new(
                "Download Used (MB)",
                SeriesColor::Blue,
                column(records, session, |s| s.download_used_mb),
            ),
            Series::new(
                "Upload Used (MB)",
                SeriesColor::Green,
                column(records, session, |s| s.upload_used_mb),
            ),
            Series::new(
                "Total Used (MB)",
                SeriesColor::Orange,
                column(records, session, |s| s.total_used_mb),
            ),
        ],
        HistoryCategory::Devices => vec![Series::new(
            "Registered Devices",
            SeriesColor::Purple,
            (1..=records.len()).map(|n| Some(n as f64)).collect(),
        )],
    }
}

/// Raw timestamp text per record, `""` when absent.
pub fn x_labels(records: &[HistoryRecord]) -> Vec<String> {
    records.iter().map(|r| r.label().to_owned()).collect()
}

/// Labels and series together.
pub fn chart(category: HistoryCategory, records: &[HistoryRecord]) -> ChartData {
    ChartData {
        labels: x_labels(records),
        series: project(category, records),
    }
}
