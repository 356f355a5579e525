//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use netwatch_config::ConfigError;
use netwatch_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to monitoring server at {url}")]
    #[diagnostic(
        code(netwatch::connection_failed),
        help(
            "Check that the server is running and reachable.\n\
             Hosted instances may need a minute to wake up.\n\
             Try: netwatch status"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Resources ────────────────────────────────────────────────────
    #[error("Endpoint not found: {message}")]
    #[diagnostic(
        code(netwatch::not_found),
        help("The server may be an older version without this endpoint.")
    )]
    NotFound { message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Server error{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    #[diagnostic(code(netwatch::api_error))]
    ApiError { status: Option<u16>, message: String },

    #[error("Server refused the request: {message}")]
    #[diagnostic(code(netwatch::rejected))]
    Rejected { message: String },

    #[error("Unexpected response from server: {message}")]
    #[diagnostic(
        code(netwatch::malformed_response),
        help("Check that --api-url points at the monitoring API, not the dashboard.")
    )]
    MalformedResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(netwatch::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(netwatch::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: netwatch config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No monitoring server configured")]
    #[diagnostic(
        code(netwatch::no_config),
        help(
            "Create a profile with: netwatch config init\n\
             Or pass --api-url / set NETWATCH_API_URL.\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(netwatch::config))]
    Config(Box<figment::Error>),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(netwatch::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    #[error("Purge of {category} history was not confirmed")]
    #[diagnostic(code(netwatch::purge_not_confirmed))]
    PurgeNotConfirmed { category: String },

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(netwatch::timeout),
        help("Increase timeout with --timeout or check server responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(netwatch::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(netwatch::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::NoConfig { .. }
            | Self::ProfileNotFound { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::PurgeNotConfirmed { category } => CliError::PurgeNotConfirmed {
                category: category.to_string(),
            },

            CoreError::Rejected { message } => CliError::Rejected { message },

            CoreError::Api {
                message,
                status: Some(404),
            } => CliError::NotFound { message },

            CoreError::Api { message, status } => CliError::ApiError { status, message },

            CoreError::MalformedResponse { message } => CliError::MalformedResponse { message },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: "(none)".into(),
            },
            ConfigError::Serialization(e) => CliError::Validation {
                field: "config".into(),
                reason: format!("failed to serialize config: {e}"),
            },
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}
