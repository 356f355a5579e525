// History endpoints
//
// Each of the server's four history tables has a read endpoint that wraps
// its rows in a named field, and a delete endpoint that clears the table.

use std::fmt;

use tracing::debug;

use crate::client::{MonitorClient, decode};
use crate::error::Error;
use crate::models::{DeviceEntry, PurgeReceipt, SessionEntry, SpeedtestEntry, TrafficEntry};

/// A server-side history table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryResource {
    Devices,
    Speedtest,
    Traffic,
    Sessions,
}

impl HistoryResource {
    pub const ALL: [Self; 4] = [Self::Devices, Self::Speedtest, Self::Traffic, Self::Sessions];

    /// Read endpoint path.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Devices => "devices/db",
            Self::Speedtest => "speedtest/historico",
            Self::Traffic => "trafego/historico",
            Self::Sessions => "trafego/sessoes",
        }
    }

    /// Field of the read response that holds the rows.
    pub const fn envelope_key(self) -> &'static str {
        match self {
            Self::Devices => "dispositivos",
            Self::Speedtest | Self::Traffic => "historico",
            Self::Sessions => "sessoes",
        }
    }

    /// Delete endpoint path.
    pub const fn purge_path(self) -> &'static str {
        match self {
            Self::Devices => "deletar/dispositivos",
            Self::Speedtest => "deletar/speedtest",
            Self::Traffic => "deletar/trafego",
            Self::Sessions => "deletar/sessoes",
        }
    }
}

impl fmt::Display for HistoryResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Devices => "devices",
            Self::Speedtest => "speedtest",
            Self::Traffic => "traffic",
            Self::Sessions => "sessions",
        })
    }
}

impl MonitorClient {
    /// Registered devices stored by the server.
    pub async fn device_history(&self) -> Result<Vec<DeviceEntry>, Error> {
        self.history(HistoryResource::Devices).await
    }

    /// Stored speed test results.
    pub async fn speedtest_history(&self) -> Result<Vec<SpeedtestEntry>, Error> {
        self.history(HistoryResource::Speedtest).await
    }

    /// Stored traffic samples.
    pub async fn traffic_history(&self) -> Result<Vec<TrafficEntry>, Error> {
        self.history(HistoryResource::Traffic).await
    }

    /// Stored usage sessions.
    pub async fn session_history(&self) -> Result<Vec<SessionEntry>, Error> {
        self.history(HistoryResource::Sessions).await
    }

    /// Delete every row of a history table.
    ///
    /// Irreversible. Callers are expected to have confirmed intent.
    pub async fn purge_history(&self, resource: HistoryResource) -> Result<PurgeReceipt, Error> {
        let body = self.delete(resource.purge_path()).await?;
        decode(body)
    }

    async fn history<T: serde::de::DeserializeOwned>(
        &self,
        resource: HistoryResource,
    ) -> Result<Vec<T>, Error> {
        let rows: Vec<T> = self
            .get_list(resource.path(), resource.envelope_key())
            .await?;
        debug!(%resource, count = rows.len(), "history rows received");
        Ok(rows)
    }
}
