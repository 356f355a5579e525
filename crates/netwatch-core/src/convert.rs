// ── API-to-domain type conversions ──
//
// Bridges raw `netwatch_api` rows into `netwatch_core::model` records.
// Each `From` impl renames fields, parses timestamps, and fills defaults
// for missing optional data.

use netwatch_api::models::{DeviceEntry, SessionEntry, SpeedtestEntry, TrafficEntry};

use crate::model::{
    DeviceRecord, HistoryRecord, SessionRecord, SpeedtestRecord, Stamp, TrafficRecord,
};

/// Blank text counts as absent.
fn stamp(raw: Option<String>) -> Option<Stamp> {
    raw.filter(|s| !s.trim().is_empty()).map(Stamp::parse)
}

impl From<DeviceEntry> for DeviceRecord {
    fn from(d: DeviceEntry) -> Self {
        Self {
            ip: d.ip,
            mac: d.mac,
            hostname: d.hostname,
            kind: d.kind,
            vendor: d.vendor,
            last_checked: stamp(d.last_checked),
            online: d.online.unwrap_or(false),
        }
    }
}

impl From<SpeedtestEntry> for SpeedtestRecord {
    fn from(s: SpeedtestEntry) -> Self {
        Self {
            taken_at: stamp(s.timestamp),
            download_mbps: s.download_mbps,
            upload_mbps: s.upload_mbps,
            ping_ms: s.ping_ms,
        }
    }
}

impl From<TrafficEntry> for TrafficRecord {
    fn from(t: TrafficEntry) -> Self {
        Self {
            taken_at: stamp(t.timestamp),
            download_mb: t.download_mb,
            upload_mb: t.upload_mb,
        }
    }
}

impl From<SessionEntry> for SessionRecord {
    fn from(s: SessionEntry) -> Self {
        Self {
            started_at: stamp(s.started_at),
            ended_at: stamp(s.ended_at),
            download_used_mb: s.download_used_mb,
            upload_used_mb: s.upload_used_mb,
            total_used_mb: s.total_used_mb,
        }
    }
}

impl From<DeviceEntry> for HistoryRecord {
    fn from(d: DeviceEntry) -> Self {
        Self::Device(d.into())
    }
}

impl From<SpeedtestEntry> for HistoryRecord {
    fn from(s: SpeedtestEntry) -> Self {
        Self::Speedtest(s.into())
    }
}

impl From<TrafficEntry> for HistoryRecord {
    fn from(t: TrafficEntry) -> Self {
        Self::Traffic(t.into())
    }
}

impl From<SessionEntry> for HistoryRecord {
    fn from(s: SessionEntry) -> Self {
        Self::Session(s.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_without_online_flag_is_offline() {
        let record = DeviceRecord::from(DeviceEntry {
            ip: Some("192.168.0.4".into()),
            last_checked: Some("2024-05-01 10:00:00".into()),
            ..DeviceEntry::default()
        });
        assert!(!record.online);
        assert!(record.last_checked.and_then(|s| s.at()).is_some());
    }

    #[test]
    fn blank_timestamp_is_absent() {
        let record = HistoryRecord::from(TrafficEntry {
            timestamp: Some("  ".into()),
            download_mb: Some(1.0),
            upload_mb: Some(2.0),
        });
        assert_eq!(record.label(), "");
        assert_eq!(record.timestamp(), None);
    }
}
