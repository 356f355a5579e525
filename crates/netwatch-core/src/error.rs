// ── Core error types ──
//
// User-facing errors from netwatch-core. Consumers never see reqwest or
// serde failures directly. The `From<netwatch_api::Error>` impl translates
// transport-layer errors into domain-appropriate variants.

use thiserror::Error;

use crate::model::HistoryCategory;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to monitoring server at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Monitoring server timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Purge of {category} history was not confirmed")]
    PurgeNotConfirmed { category: HistoryCategory },

    #[error("Operation rejected by server: {message}")]
    Rejected { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// HTTP status behind this error, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<netwatch_api::Error> for CoreError {
    fn from(err: netwatch_api::Error) -> Self {
        match err {
            netwatch_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            netwatch_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            netwatch_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            // 4xx answers carry a server-side refusal (e.g. a session already open).
            netwatch_api::Error::Api { status, message }
                if (400..500).contains(&status) && status != 404 =>
            {
                CoreError::Rejected { message }
            }
            netwatch_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            netwatch_api::Error::MissingEnvelope { key } => CoreError::MalformedResponse {
                message: format!("expected a '{key}' field in the response"),
            },
            netwatch_api::Error::Deserialization { message, body: _ } => {
                CoreError::MalformedResponse { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_maps_to_rejected() {
        let err = CoreError::from(netwatch_api::Error::Api {
            status: 400,
            message: "session already open".into(),
        });
        assert!(matches!(err, CoreError::Rejected { ref message } if message == "session already open"));
    }

    #[test]
    fn server_failure_keeps_status() {
        let err = CoreError::from(netwatch_api::Error::Api {
            status: 500,
            message: "database locked".into(),
        });
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn missing_envelope_is_malformed() {
        let err = CoreError::from(netwatch_api::Error::MissingEnvelope { key: "historico" });
        assert!(err.to_string().contains("historico"));
        assert!(matches!(err, CoreError::MalformedResponse { .. }));
    }
}
