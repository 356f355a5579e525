// ── Normalized history records ──
//
// One variant per category. Every variant carries exactly one
// timestamp-bearing field, which the temporal filter reads and the chart
// uses as its x-axis label.

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Serialize, Serializer};

use super::category::HistoryCategory;

/// A timestamp as the server sent it, plus the instant it denotes.
///
/// The raw text is kept for display; `at` is `None` when the text is not
/// in any recognised format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    raw: String,
    at: Option<NaiveDateTime>,
}

impl Stamp {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let at = parse_wall_clock(&raw);
        Self { raw, at }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn at(&self) -> Option<NaiveDateTime> {
        self.at
    }
}

impl Serialize for Stamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

const WALL_CLOCK_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse the server's local wall-clock timestamps. Zoned RFC 3339 text is
/// converted to the local wall clock.
fn parse_wall_clock(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    WALL_CLOCK_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.with_timezone(&Local).naive_local())
        })
}

/// `download + upload`, rounded to two decimals. Missing if either side is.
fn rounded_sum(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    Some(((a? + b?) * 100.0).round() / 100.0)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceRecord {
    pub ip: Option<String>,
    pub mac: Option<String>,
    pub hostname: Option<String>,
    pub kind: Option<String>,
    pub vendor: Option<String>,
    pub last_checked: Option<Stamp>,
    pub online: bool,
}

/// One stored speed test. Throughput is in megabits per second.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpeedtestRecord {
    pub taken_at: Option<Stamp>,
    pub download_mbps: Option<f64>,
    pub upload_mbps: Option<f64>,
    pub ping_ms: Option<f64>,
}

impl SpeedtestRecord {
    pub fn total_mb(&self) -> Option<f64> {
        rounded_sum(self.download_mbps, self.upload_mbps)
    }
}

/// One traffic sample. Volumes are cumulative megabytes at sample time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrafficRecord {
    pub taken_at: Option<Stamp>,
    pub download_mb: Option<f64>,
    pub upload_mb: Option<f64>,
}

impl TrafficRecord {
    pub fn total_mb(&self) -> Option<f64> {
        rounded_sum(self.download_mb, self.upload_mb)
    }
}

/// A closed (or still open) usage session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionRecord {
    pub started_at: Option<Stamp>,
    pub ended_at: Option<Stamp>,
    pub download_used_mb: Option<f64>,
    pub upload_used_mb: Option<f64>,
    pub total_used_mb: Option<f64>,
}

/// A normalized historical observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum HistoryRecord {
    Device(DeviceRecord),
    Speedtest(SpeedtestRecord),
    Traffic(TrafficRecord),
    Session(SessionRecord),
}

impl HistoryRecord {
    pub fn category(&self) -> HistoryCategory {
        match self {
            Self::Device(_) => HistoryCategory::Devices,
            Self::Speedtest(_) => HistoryCategory::Speedtest,
            Self::Traffic(_) => HistoryCategory::Traffic,
            Self::Session(_) => HistoryCategory::Sessions,
        }
    }

    /// The record's timestamp-bearing field.
    pub fn stamp(&self) -> Option<&Stamp> {
        match self {
            Self::Device(d) => d.last_checked.as_ref(),
            Self::Speedtest(s) => s.taken_at.as_ref(),
            Self::Traffic(t) => t.taken_at.as_ref(),
            Self::Session(s) => s.started_at.as_ref(),
        }
    }

    /// Parsed instant of the record, if it has a recognisable one.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.stamp().and_then(Stamp::at)
    }

    /// Raw timestamp text, or `""`.
    pub fn label(&self) -> &str {
        self.stamp().map_or("", Stamp::raw)
    }
}
