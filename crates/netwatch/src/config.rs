//! CLI configuration -- thin wrapper around `netwatch_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--api-url, --insecure, ...).

use std::time::Duration;

use clap::ValueEnum;

use netwatch_core::{MonitorConfig, TimeWindow, TlsVerification};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat, WindowArg};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use netwatch_config::{
    Config, DEFAULT_API_URL, Profile, config_path, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Fill unset output, color, and window flags from `[defaults]`.
pub fn apply_defaults(global: &mut GlobalOpts, config: &Config) -> Result<(), CliError> {
    if global.output.is_none() {
        global.output = Some(parse_value("defaults.output", &config.defaults.output)?);
    }
    if global.color.is_none() {
        global.color = Some(parse_value("defaults.color", &config.defaults.color)?);
    }
    if global.window.is_none() {
        global.window = Some(parse_value("defaults.window", &config.defaults.window)?);
    }
    Ok(())
}

fn parse_value<T: ValueEnum>(field: &str, raw: &str) -> Result<T, CliError> {
    T::from_str(raw, true).map_err(|reason| CliError::Validation {
        field: field.into(),
        reason,
    })
}

/// The selected window, as the core type.
pub fn time_window(global: &GlobalOpts) -> TimeWindow {
    match global.window.unwrap_or(WindowArg::All) {
        WindowArg::All => TimeWindow::All,
        WindowArg::Last5Min => TimeWindow::Last5Min,
        WindowArg::Last30Min => TimeWindow::Last30Min,
        WindowArg::LastHour => TimeWindow::LastHour,
        WindowArg::LastWeek => TimeWindow::LastWeek,
        WindowArg::LastMonth => TimeWindow::LastMonth,
    }
}

/// Build a `MonitorConfig` from the config file, profile, and CLI overrides.
pub fn resolve_monitor_config(
    global: &GlobalOpts,
    config: &Config,
) -> Result<MonitorConfig, CliError> {
    let profile_name = active_profile_name(global, config);

    if let Some(profile) = config.profiles.get(&profile_name) {
        return resolve_profile(profile, global, config);
    }

    // An explicitly requested profile that doesn't exist is an error even
    // when --api-url is given.
    if global.profile.is_some() {
        let mut available: Vec<_> = config.profiles.keys().cloned().collect();
        available.sort();
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: if available.is_empty() {
                "(none)".into()
            } else {
                available.join(", ")
            },
        });
    }

    // No profile -- build from CLI flags / env vars alone
    let url_str = global.api_url.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;

    resolve_profile(&Profile::new(url_str), global, config)
}

/// Translate a `Profile` + global flags into a `MonitorConfig`.
///
/// CLI flag overrides take priority over profile values, which take
/// priority over `[defaults]`.
pub fn resolve_profile(
    profile: &Profile,
    global: &GlobalOpts,
    config: &Config,
) -> Result<MonitorConfig, CliError> {
    // 1. URL (flag > env > profile)
    let url_str = global.api_url.as_deref().unwrap_or(&profile.api_url);
    let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "api_url".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    // 2. TLS verification
    let tls = if global.insecure || profile.insecure.unwrap_or(config.defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    // 3. Timeout
    let timeout = Duration::from_secs(
        global
            .timeout
            .or(profile.timeout)
            .unwrap_or(config.defaults.timeout),
    );

    // 4. Window cutoffs
    let windows = config.windows.to_table()?;

    Ok(MonitorConfig {
        url,
        tls,
        timeout,
        windows,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["netwatch"];
        argv.extend_from_slice(args);
        argv.push("status");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with(name: &str, profile: Profile) -> Config {
        let mut config = Config::default();
        config.profiles.insert(name.into(), profile);
        config
    }

    #[test]
    fn flags_override_profile() {
        let mut profile = Profile::new("http://192.168.0.2:5000");
        profile.timeout = Some(10);
        let config = config_with("default", profile);

        let resolved = resolve_monitor_config(
            &global(&["--api-url", "http://10.0.0.5:5000", "--timeout", "3", "-k"]),
            &config,
        )
        .unwrap();

        assert_eq!(resolved.url.as_str(), "http://10.0.0.5:5000/");
        assert_eq!(resolved.timeout, Duration::from_secs(3));
        assert_eq!(resolved.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn profile_timeout_beats_defaults() {
        let mut profile = Profile::new("http://192.168.0.2:5000");
        profile.timeout = Some(10);
        let config = config_with("default", profile);

        let resolved = resolve_monitor_config(&global(&[]), &config).unwrap();
        assert_eq!(resolved.timeout, Duration::from_secs(10));
        assert_eq!(resolved.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn missing_profile_without_url_is_no_config() {
        let err = resolve_monitor_config(&global(&[]), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoConfig { .. }));
    }

    #[test]
    fn api_url_alone_is_enough() {
        let resolved =
            resolve_monitor_config(&global(&["-u", "http://127.0.0.1:5000"]), &Config::default())
                .unwrap();
        assert_eq!(resolved.url.port(), Some(5000));
    }

    #[test]
    fn unknown_explicit_profile_lists_available() {
        let config = config_with("home", Profile::new("http://192.168.0.2:5000"));
        let err = resolve_monitor_config(&global(&["-p", "office"]), &config).unwrap_err();
        assert!(
            matches!(err, CliError::ProfileNotFound { ref available, .. } if available == "home")
        );
    }

    #[test]
    fn defaults_fill_unset_flags() {
        let mut config = Config::default();
        config.defaults.output = "json".into();
        config.defaults.window = "1h".into();

        let mut opts = global(&["--color", "never"]);
        apply_defaults(&mut opts, &config).unwrap();

        assert!(matches!(opts.output, Some(OutputFormat::Json)));
        assert!(matches!(opts.color, Some(ColorMode::Never)));
        assert_eq!(time_window(&opts), TimeWindow::LastHour);
    }

    #[test]
    fn bad_default_is_reported_by_field() {
        let mut config = Config::default();
        config.defaults.window = "fortnight".into();
        let err = apply_defaults(&mut global(&[]), &config).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "defaults.window"));
    }
}
