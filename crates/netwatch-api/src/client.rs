// Monitoring API HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, `{"erro": ...}` error
// extraction, and named-list envelope unwrapping. Endpoint groups
// (history, live) are implemented as inherent methods in separate files
// to keep this module focused on transport mechanics.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for the monitoring server.
///
/// Every endpoint answers with a JSON object. List endpoints wrap their
/// payload in a single named field (`{"historico": [...]}`), and failures
/// carry `{"erro": "..."}` with a non-2xx status. Callers of the typed
/// methods only ever see the unwrapped payload.
#[derive(Debug, Clone)]
pub struct MonitorClient {
    http: reqwest::Client,
    base_url: Url,
}

impl MonitorClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the server root, e.g. `https://monitor.example.com`.
    /// A path prefix is allowed and preserved when endpoints are joined.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Parse `base_url` and wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self::with_client(http, Url::parse(base_url)?))
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join an endpoint path onto the base URL, keeping any path prefix.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, Error> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        Ok(base.join(path.trim_start_matches('/'))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and return the parsed JSON body.
    pub(crate) async fn get(&self, path: &str) -> Result<Value, Error> {
        let url = self.endpoint(path)?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        Self::parse_response(resp).await
    }

    /// Send a body-less POST request and return the parsed JSON body.
    pub(crate) async fn post(&self, path: &str) -> Result<Value, Error> {
        let url = self.endpoint(path)?;
        debug!("POST {}", url);

        let resp = self.http.post(url).send().await.map_err(Error::Transport)?;
        Self::parse_response(resp).await
    }

    /// Send a DELETE request and return the parsed JSON body.
    pub(crate) async fn delete(&self, path: &str) -> Result<Value, Error> {
        let url = self.endpoint(path)?;
        debug!("DELETE {}", url);

        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::parse_response(resp).await
    }

    /// GET a list endpoint and unwrap the named envelope field.
    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &'static str,
    ) -> Result<Vec<T>, Error> {
        let body = self.get(path).await?;
        unwrap_envelope(body, key)
    }

    /// Map a response onto `Ok(json)` or an `Error::Api` carrying the
    /// server's own error text.
    async fn parse_response(resp: reqwest::Response) -> Result<Value, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            let message = error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_owned()
            });
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}

/// Pull the `erro` (or `message`) field out of an error body.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["erro", "error", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_owned)
}

/// Take `key` out of a JSON object and decode it as a list.
pub(crate) fn unwrap_envelope<T: DeserializeOwned>(
    mut body: Value,
    key: &'static str,
) -> Result<Vec<T>, Error> {
    let list = body
        .get_mut(key)
        .map(Value::take)
        .filter(|v| !v.is_null())
        .ok_or(Error::MissingEnvelope { key })?;
    decode(list)
}

/// Decode a JSON value, keeping its text for the error on failure.
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    let body = value.to_string();
    serde_json::from_value(value).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body,
    })
}
