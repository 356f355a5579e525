// Live endpoints: health, machine identity, network scans, current traffic,
// on-demand speed tests, and usage session control.

use serde_json::Value;

use crate::client::{MonitorClient, decode, unwrap_envelope};
use crate::error::Error;
use crate::models::{
    DeviceEntry, HealthStatus, MachineInfo, SessionFinished, SessionStarted, SpeedtestResult,
    TrafficSnapshot,
};

impl MonitorClient {
    /// Server liveness check.
    pub async fn ping(&self) -> Result<HealthStatus, Error> {
        decode(self.get("ping").await?)
    }

    /// Identity of the machine the server runs on.
    pub async fn machine(&self) -> Result<MachineInfo, Error> {
        decode(self.get("maquina").await?)
    }

    /// Run an ARP scan and register what answers.
    pub async fn scan_devices(&self) -> Result<Vec<DeviceEntry>, Error> {
        self.get_list("devices", "dispositivos").await
    }

    /// Devices seen on the local subnet.
    ///
    /// Some server versions answer with a bare list instead of the
    /// `{"dispositivos": [...]}` envelope; both are accepted.
    pub async fn subnet_devices(&self) -> Result<Vec<DeviceEntry>, Error> {
        match self.get("dispositivos/rede").await? {
            list @ Value::Array(_) => decode(list),
            body => unwrap_envelope(body, "dispositivos"),
        }
    }

    /// Current interface counters. The server also records the sample.
    pub async fn current_traffic(&self) -> Result<TrafficSnapshot, Error> {
        let body = self.get("trafego").await?;
        decode(take_field(body, "trafego")?)
    }

    /// Run a speed test on the server. Takes tens of seconds.
    ///
    /// A failed measurement is reported with status 200 and an `erro`
    /// field, which is surfaced here as `Error::Api`.
    pub async fn run_speedtest(&self) -> Result<SpeedtestResult, Error> {
        let body = self.get("speedtest_module").await?;
        let result: SpeedtestResult = decode(take_field(body, "velocidade")?)?;
        match result.error {
            Some(message) => Err(Error::Api {
                status: 200,
                message,
            }),
            None => Ok(result),
        }
    }

    /// Open a usage session at the current counters.
    pub async fn start_session(&self) -> Result<SessionStarted, Error> {
        decode(self.post("trafego/sessao/iniciar").await?)
    }

    /// Close the open usage session and record its totals.
    pub async fn finish_session(&self) -> Result<SessionFinished, Error> {
        decode(self.post("trafego/sessao/finalizar").await?)
    }
}

fn take_field(mut body: Value, key: &'static str) -> Result<Value, Error> {
    body.get_mut(key)
        .map(Value::take)
        .filter(|v| v.is_object())
        .ok_or(Error::MissingEnvelope { key })
}
