// Monitoring API response types
//
// Wire field names are the server's (Portuguese) keys; the Rust names are
// English. Every field is optional and numeric fields go through a lenient
// decoder because the server stores values as text in some tables and as
// numbers in others, and older rows can be missing columns entirely.

use serde::{Deserialize, Serialize};

// ── Lenient field decoders ───────────────────────────────────────────

pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Number, numeric string, or nothing. Anything else decodes as `None`.
    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(Option::<Value>::deserialize(d)?.and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }))
    }

    /// Integer id that may arrive as a number or a string.
    pub fn integer<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        Ok(Option::<Value>::deserialize(d)?.and_then(|v| match v {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }))
    }

    /// Text field; numbers are rendered to text, everything else is `None`.
    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(Option::<Value>::deserialize(d)?.and_then(|v| match v {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }))
    }

    /// Boolean stored as `true`/`false`, `0`/`1`, or their string forms.
    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        Ok(Option::<Value>::deserialize(d)?.and_then(|v| match v {
            Value::Bool(b) => Some(b),
            Value::Number(n) => n.as_i64().map(|n| n != 0),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "online" => Some(true),
                "false" | "0" | "offline" => Some(false),
                _ => None,
            },
            _ => None,
        }))
    }
}

// ── History rows ─────────────────────────────────────────────────────

/// Device row from `devices/db`, `devices`, and `dispositivos/rede`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceEntry {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub ip: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub mac: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub hostname: Option<String>,
    #[serde(default, rename = "tipo", deserialize_with = "lenient::text")]
    pub kind: Option<String>,
    #[serde(default, rename = "fabricante", deserialize_with = "lenient::text")]
    pub vendor: Option<String>,
    #[serde(default, rename = "ultima_verificacao", deserialize_with = "lenient::text")]
    pub last_checked: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub online: Option<bool>,
}

/// Speed test row from `speedtest/historico`.
///
/// The server names the throughput columns `*_mb` but the values are
/// megabits per second.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeedtestEntry {
    #[serde(default, deserialize_with = "lenient::text")]
    pub timestamp: Option<String>,
    #[serde(default, rename = "download_mb", deserialize_with = "lenient::number")]
    pub download_mbps: Option<f64>,
    #[serde(default, rename = "upload_mb", deserialize_with = "lenient::number")]
    pub upload_mbps: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub ping_ms: Option<f64>,
}

/// Traffic sample row from `trafego/historico`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrafficEntry {
    #[serde(default, deserialize_with = "lenient::text")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub download_mb: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub upload_mb: Option<f64>,
}

/// Usage session row from `trafego/sessoes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionEntry {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub id: Option<i64>,
    #[serde(default, rename = "dispositivo_id", deserialize_with = "lenient::integer")]
    pub device_id: Option<i64>,
    #[serde(default, rename = "inicio", deserialize_with = "lenient::text")]
    pub started_at: Option<String>,
    #[serde(default, rename = "fim", deserialize_with = "lenient::text")]
    pub ended_at: Option<String>,
    #[serde(default, rename = "download_usado_mb", deserialize_with = "lenient::number")]
    pub download_used_mb: Option<f64>,
    #[serde(default, rename = "upload_usado_mb", deserialize_with = "lenient::number")]
    pub upload_used_mb: Option<f64>,
    #[serde(default, rename = "total_usado_mb", deserialize_with = "lenient::number")]
    pub total_used_mb: Option<f64>,
}

/// Body of a successful history delete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurgeReceipt {
    #[serde(default, rename = "mensagem", deserialize_with = "lenient::text")]
    pub message: Option<String>,
}

// ── Live readings ────────────────────────────────────────────────────

/// `ping` health answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default, deserialize_with = "lenient::text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub message: Option<String>,
}

/// Identity of the machine running the monitoring server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineInfo {
    #[serde(default, deserialize_with = "lenient::text")]
    pub ip: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub mac: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub hostname: Option<String>,
}

/// Current interface counters, wrapped in `{"trafego": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrafficSnapshot {
    #[serde(default, rename = "data", deserialize_with = "lenient::text")]
    pub taken_at: Option<String>,
    #[serde(default, rename = "dispositivo_ip", deserialize_with = "lenient::text")]
    pub device_ip: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub download_mb: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub upload_mb: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_mb: Option<f64>,
}

/// Speed test result, wrapped in `{"velocidade": {...}}`.
///
/// A failed measurement comes back with status 200 and only `erro` set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeedtestResult {
    #[serde(default, rename = "dispositivo_id", deserialize_with = "lenient::integer")]
    pub device_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub timestamp: Option<String>,
    #[serde(default, rename = "download_mb", deserialize_with = "lenient::number")]
    pub download_mbps: Option<f64>,
    #[serde(default, rename = "upload_mb", deserialize_with = "lenient::number")]
    pub upload_mbps: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub ping_ms: Option<f64>,
    #[serde(default, rename = "erro", deserialize_with = "lenient::text")]
    pub error: Option<String>,
}

/// Answer to `trafego/sessao/iniciar`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStarted {
    #[serde(default, deserialize_with = "lenient::text")]
    pub status: Option<String>,
    #[serde(default, rename = "dispositivo_id", deserialize_with = "lenient::integer")]
    pub device_id: Option<i64>,
    #[serde(default, rename = "inicio", deserialize_with = "lenient::text")]
    pub started_at: Option<String>,
    #[serde(default, rename = "download_inicial", deserialize_with = "lenient::number")]
    pub initial_download_mb: Option<f64>,
    #[serde(default, rename = "upload_inicial", deserialize_with = "lenient::number")]
    pub initial_upload_mb: Option<f64>,
}

/// Answer to `trafego/sessao/finalizar`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionFinished {
    #[serde(default, deserialize_with = "lenient::text")]
    pub status: Option<String>,
    #[serde(default, rename = "dispositivo_id", deserialize_with = "lenient::integer")]
    pub device_id: Option<i64>,
    #[serde(default, rename = "inicio", deserialize_with = "lenient::text")]
    pub started_at: Option<String>,
    #[serde(default, rename = "fim", deserialize_with = "lenient::text")]
    pub ended_at: Option<String>,
    #[serde(default, rename = "download_usado_mb", deserialize_with = "lenient::number")]
    pub download_used_mb: Option<f64>,
    #[serde(default, rename = "upload_usado_mb", deserialize_with = "lenient::number")]
    pub upload_used_mb: Option<f64>,
    #[serde(default, rename = "total_usado_mb", deserialize_with = "lenient::number")]
    pub total_used_mb: Option<f64>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn speedtest_entry_accepts_numeric_strings() {
        let entry: SpeedtestEntry = serde_json::from_value(json!({
            "timestamp": "2024-05-01 10:00:00",
            "download_mb": "93.5",
            "upload_mb": 11.2,
            "ping_ms": "n/a"
        }))
        .unwrap();
        assert_eq!(entry.download_mbps, Some(93.5));
        assert_eq!(entry.upload_mbps, Some(11.2));
        assert_eq!(entry.ping_ms, None);
    }

    #[test]
    fn missing_fields_decode_as_none() {
        let entry: TrafficEntry = serde_json::from_value(json!({})).unwrap();
        assert_eq!(entry, TrafficEntry::default());
    }

    #[test]
    fn device_online_accepts_integer_flags() {
        let device: DeviceEntry = serde_json::from_value(json!({
            "ip": "192.168.0.7",
            "online": 1,
            "tipo": "Smartphone",
            "fabricante": "Samsung"
        }))
        .unwrap();
        assert_eq!(device.online, Some(true));
        assert_eq!(device.kind.as_deref(), Some("Smartphone"));
        assert_eq!(device.vendor.as_deref(), Some("Samsung"));
    }

    #[test]
    fn session_entry_maps_wire_names() {
        let session: SessionEntry = serde_json::from_value(json!({
            "id": 4,
            "dispositivo_id": "2",
            "inicio": "2024-05-01 09:00:00.123456",
            "fim": null,
            "download_usado_mb": 120.5,
            "upload_usado_mb": 10,
            "total_usado_mb": 130.5
        }))
        .unwrap();
        assert_eq!(session.device_id, Some(2));
        assert_eq!(session.ended_at, None);
        assert_eq!(session.upload_used_mb, Some(10.0));
    }
}
