// ── Runtime connection configuration ──
//
// These types describe *how* to reach a monitoring server and which window
// cutoffs to apply. They never touch disk. The CLI/TUI builds a
// `MonitorConfig` and hands it in.

use std::time::Duration;

use url::Url;

use crate::filter::WindowTable;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict). The hosted server has a public certificate.
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs on a LAN server).
    DangerAcceptInvalid,
}

/// Configuration for talking to a single monitoring server.
///
/// Built by CLI/TUI, passed to `Monitor` -- core never reads config files.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Server URL (e.g., `https://monitor.example.com`).
    pub url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// Cutoffs used by the temporal filter.
    pub windows: WindowTable,
}

impl MonitorConfig {
    /// Config with default TLS, timeout and window table.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            windows: WindowTable::default(),
        }
    }

    pub(crate) fn transport(&self) -> netwatch_api::TransportConfig {
        netwatch_api::TransportConfig {
            tls: match &self.tls {
                TlsVerification::SystemDefaults => netwatch_api::TlsMode::System,
                TlsVerification::CustomCa(path) => netwatch_api::TlsMode::CustomCa(path.clone()),
                TlsVerification::DangerAcceptInvalid => netwatch_api::TlsMode::DangerAcceptInvalid,
            },
            timeout: self.timeout,
        }
    }
}
