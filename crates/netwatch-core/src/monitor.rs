// ── Monitor service ──
//
// The one handle CLI and TUI hold. Owns the HTTP client and the runtime
// config, fetches and normalizes history, guards the destructive purge,
// and passes the live readings through.

use tracing::{debug, info, warn};

use netwatch_api::MonitorClient;

use crate::config::MonitorConfig;
use crate::error::CoreError;
use crate::filter::WindowTable;
use crate::model::{DeviceRecord, HistoryCategory, HistoryRecord};
use netwatch_api::models::{
    HealthStatus, MachineInfo, PurgeReceipt, SessionFinished, SessionStarted, SpeedtestResult,
    TrafficSnapshot,
};

/// Proof that the user agreed to wipe one category's history.
///
/// Built only by [`PurgeConfirmation::confirm`] after asking, and only
/// valid for the category it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurgeConfirmation {
    category: HistoryCategory,
}

impl PurgeConfirmation {
    pub fn confirm(category: HistoryCategory) -> Self {
        Self { category }
    }

    pub fn category(&self) -> HistoryCategory {
        self.category
    }
}

/// Handle to one monitoring server.
#[derive(Debug, Clone)]
pub struct Monitor {
    client: MonitorClient,
    config: MonitorConfig,
}

impl Monitor {
    pub fn new(config: MonitorConfig) -> Result<Self, CoreError> {
        let client = MonitorClient::new(config.url.clone(), &config.transport())?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn windows(&self) -> &WindowTable {
        &self.config.windows
    }

    // ── History ──────────────────────────────────────────────────────

    /// Fetch and normalize one category's history.
    ///
    /// Never fails: any error is logged and an empty list is returned.
    pub async fn fetch_history(&self, category: HistoryCategory) -> Vec<HistoryRecord> {
        match self.try_fetch_history(category).await {
            Ok(records) => records,
            Err(e) => {
                warn!(%category, error = %e, "history fetch failed, showing no records");
                Vec::new()
            }
        }
    }

    /// Like [`Monitor::fetch_history`], but hands the error back.
    pub async fn try_fetch_history(
        &self,
        category: HistoryCategory,
    ) -> Result<Vec<HistoryRecord>, CoreError> {
        let records: Vec<HistoryRecord> = match category {
            HistoryCategory::Devices => collect(self.client.device_history().await),
            HistoryCategory::Speedtest => collect(self.client.speedtest_history().await),
            HistoryCategory::Traffic => collect(self.client.traffic_history().await),
            HistoryCategory::Sessions => collect(self.client.session_history().await),
        }
        .map_err(|e| self.lift(e))?;

        debug!(%category, count = records.len(), "history normalized");
        Ok(records)
    }

    /// Delete every stored record of `category`. Irreversible.
    ///
    /// Refuses, without contacting the server, unless `confirmation` was
    /// given for this same category.
    pub async fn purge(
        &self,
        category: HistoryCategory,
        confirmation: PurgeConfirmation,
    ) -> Result<PurgeReceipt, CoreError> {
        if confirmation.category != category {
            return Err(CoreError::PurgeNotConfirmed { category });
        }

        info!(%category, "purging history");
        self.client
            .purge_history(category.resource())
            .await
            .map_err(|e| self.lift(e))
    }

    // ── Live readings ────────────────────────────────────────────────

    pub async fn health(&self) -> Result<HealthStatus, CoreError> {
        self.client.ping().await.map_err(|e| self.lift(e))
    }

    pub async fn machine(&self) -> Result<MachineInfo, CoreError> {
        self.client.machine().await.map_err(|e| self.lift(e))
    }

    /// Trigger an ARP scan on the server and return what it found.
    pub async fn scan_devices(&self) -> Result<Vec<DeviceRecord>, CoreError> {
        let entries = self.client.scan_devices().await.map_err(|e| self.lift(e))?;
        Ok(entries.into_iter().map(DeviceRecord::from).collect())
    }

    pub async fn subnet_devices(&self) -> Result<Vec<DeviceRecord>, CoreError> {
        let entries = self
            .client
            .subnet_devices()
            .await
            .map_err(|e| self.lift(e))?;
        Ok(entries.into_iter().map(DeviceRecord::from).collect())
    }

    pub async fn current_traffic(&self) -> Result<TrafficSnapshot, CoreError> {
        self.client.current_traffic().await.map_err(|e| self.lift(e))
    }

    pub async fn run_speedtest(&self) -> Result<SpeedtestResult, CoreError> {
        self.client.run_speedtest().await.map_err(|e| self.lift(e))
    }

    pub async fn start_session(&self) -> Result<SessionStarted, CoreError> {
        self.client.start_session().await.map_err(|e| self.lift(e))
    }

    pub async fn finish_session(&self) -> Result<SessionFinished, CoreError> {
        self.client.finish_session().await.map_err(|e| self.lift(e))
    }

    /// Convert an API error, filling in the configured timeout.
    fn lift(&self, err: netwatch_api::Error) -> CoreError {
        match CoreError::from(err) {
            CoreError::Timeout { .. } => CoreError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            },
            other => other,
        }
    }
}

fn collect<T: Into<HistoryRecord>>(
    rows: Result<Vec<T>, netwatch_api::Error>,
) -> Result<Vec<HistoryRecord>, netwatch_api::Error> {
    rows.map(|rows| rows.into_iter().map(Into::into).collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn offline_monitor() -> Monitor {
        // Port 9 (discard) on loopback; nothing should ever be sent.
        Monitor::new(MonitorConfig::new("http://127.0.0.1:9".parse().unwrap())).unwrap()
    }

    #[tokio::test]
    async fn purge_rejects_confirmation_for_other_category() {
        let monitor = offline_monitor();
        let err = monitor
            .purge(
                HistoryCategory::Traffic,
                PurgeConfirmation::confirm(HistoryCategory::Sessions),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::PurgeNotConfirmed {
                category: HistoryCategory::Traffic
            }
        ));
    }

    #[test]
    fn confirmation_names_its_category() {
        let confirmation = PurgeConfirmation::confirm(HistoryCategory::Devices);
        assert_eq!(confirmation.category(), HistoryCategory::Devices);
    }
}
