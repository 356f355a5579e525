//! Shared configuration for the netwatch CLI and TUI.
//!
//! TOML profiles, window-cutoff overrides, and translation to
//! `netwatch_core::MonitorConfig`. Both binaries depend on this crate; the
//! CLI adds `GlobalOpts`-aware wrappers on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::TimeDelta;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use netwatch_core::{MonitorConfig, TimeWindow, TlsVerification, WindowTable};

/// URL written by `config init` when none is given.
pub const DEFAULT_API_URL: &str = "https://mynetwork-egj2.onrender.com";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Overrides for the time-window cutoffs.
    #[serde(default)]
    pub windows: WindowOverrides,

    /// Named server profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            windows: WindowOverrides::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Look up `name`, or the default profile when `name` is `None`.
    pub fn profile(&self, name: Option<&str>) -> Result<(&str, &Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default");
        self.profiles
            .get_key_value(name)
            .map(|(k, v)| (k.as_str(), v))
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }

    /// Default window from `[defaults]`.
    pub fn default_window(&self) -> Result<TimeWindow, ConfigError> {
        parse_window(&self.defaults.window)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_window")]
    pub window: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
            window: default_window(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_window() -> String {
    "all".into()
}

/// Optional humantime durations (`"90min"`, `"30days"`) per bounded window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct WindowOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_5_min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_30_min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_hour: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_week: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_month: Option<String>,
}

impl WindowOverrides {
    /// Apply the overrides on top of the default table.
    pub fn to_table(&self) -> Result<WindowTable, ConfigError> {
        let entries = [
            (TimeWindow::Last5Min, "windows.last_5_min", &self.last_5_min),
            (TimeWindow::Last30Min, "windows.last_30_min", &self.last_30_min),
            (TimeWindow::LastHour, "windows.last_hour", &self.last_hour),
            (TimeWindow::LastWeek, "windows.last_week", &self.last_week),
            (TimeWindow::LastMonth, "windows.last_month", &self.last_month),
        ];

        entries
            .into_iter()
            .try_fold(
                WindowTable::default(),
                |table, (window, field, raw)| -> Result<WindowTable, ConfigError> {
                    Ok(match raw {
                        Some(raw) => table.with_cutoff(window, parse_cutoff(field, raw)?),
                        None => table,
                    })
                },
            )
    }
}

fn parse_cutoff(field: &str, raw: &str) -> Result<TimeDelta, ConfigError> {
    let invalid = |reason: String| ConfigError::Validation {
        field: field.into(),
        reason,
    };
    let duration = humantime::parse_duration(raw).map_err(|e| invalid(format!("{raw}: {e}")))?;
    if duration.is_zero() {
        return Err(invalid("cutoff must be greater than zero".into()));
    }
    TimeDelta::from_std(duration).map_err(|_| invalid(format!("{raw}: out of range")))
}

/// Parse a window name (`all`, `5min`, `1h`, `1week`, ...).
pub fn parse_window(raw: &str) -> Result<TimeWindow, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Validation {
        field: "window".into(),
        reason: format!("unknown window '{raw}' (expected all, 5min, 30min, 1h, 1week or 1month)"),
    })
}

/// A named monitoring server.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    /// API base URL (e.g., "https://monitor.example.com").
    pub api_url: String,

    /// Path to custom CA certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl Profile {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ca_cert: None,
            insecure: None,
            timeout: None,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "netwatch", "netwatch").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("netwatch");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file path, still layering the environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("NETWATCH_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation to the runtime form ─────────────────────────────────

/// Build a `MonitorConfig` from a profile, with no CLI flag overrides.
///
/// Profile values win over `[defaults]`. Suitable for the TUI.
pub fn profile_to_monitor_config(
    profile: &Profile,
    config: &Config,
) -> Result<MonitorConfig, ConfigError> {
    let url: url::Url = profile
        .api_url
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("invalid URL: {}", profile.api_url),
        })?;

    let tls = if profile.insecure.unwrap_or(config.defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let timeout = Duration::from_secs(profile.timeout.unwrap_or(config.defaults.timeout));

    Ok(MonitorConfig {
        url,
        tls,
        timeout,
        windows: config.windows.to_table()?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.defaults, Defaults::default());
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn loads_profiles_and_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            r#"
            default_profile = "home"

            [defaults]
            output = "json"
            window = "1h"

            [profiles.home]
            api_url = "http://192.168.0.2:5000"
            insecure = true
            timeout = 5
            "#,
        );

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.defaults.output, "json");
        assert_eq!(config.default_window().unwrap(), TimeWindow::LastHour);

        let (name, profile) = config.profile(None).unwrap();
        assert_eq!(name, "home");

        let monitor = profile_to_monitor_config(profile, &config).unwrap();
        assert_eq!(monitor.url.as_str(), "http://192.168.0.2:5000/");
        assert_eq!(monitor.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(monitor.timeout, Duration::from_secs(5));
    }

    #[test]
    fn window_overrides_replace_single_cutoffs() {
        let overrides = WindowOverrides {
            last_hour: Some("90min".into()),
            last_month: Some("31days".into()),
            ..WindowOverrides::default()
        };
        let table = overrides.to_table().unwrap();
        assert_eq!(table.cutoff(TimeWindow::LastHour), Some(TimeDelta::minutes(90)));
        assert_eq!(table.cutoff(TimeWindow::LastMonth), Some(TimeDelta::days(31)));
        assert_eq!(table.cutoff(TimeWindow::Last5Min), Some(TimeDelta::minutes(5)));
    }

    #[test]
    fn bad_window_override_names_its_field() {
        let overrides = WindowOverrides {
            last_week: Some("fortnight".into()),
            ..WindowOverrides::default()
        };
        let err = overrides.to_table().unwrap_err();
        assert!(err.to_string().contains("windows.last_week"));
    }

    #[test]
    fn unknown_profile_is_reported() {
        let err = Config::default().profile(Some("office")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProfile { ref name } if name == "office"));
    }

    #[test]
    fn invalid_url_is_a_validation_error() {
        let err = profile_to_monitor_config(&Profile::new("not a url"), &Config::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "api_url"));
    }

    #[test]
    fn save_then_load_keeps_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config
            .profiles
            .insert("default".into(), Profile::new(DEFAULT_API_URL));
        save_config_to(&config, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.profiles, config.profiles);
    }

    #[test]
    fn parse_window_rejects_unknown_names() {
        assert!(parse_window("fortnight").is_err());
        assert_eq!(parse_window("30min").unwrap(), TimeWindow::Last30Min);
    }
}
