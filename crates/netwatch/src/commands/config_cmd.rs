//! Config subcommand handlers.

use std::io::IsTerminal;

use dialoguer::Input;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config, DEFAULT_API_URL, Profile};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn validate_url(raw: &str) -> Result<String, CliError> {
    let url: url::Url = raw.trim().parse().map_err(|_| CliError::Validation {
        field: "api_url".into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CliError::Validation {
            field: "api_url".into(),
            reason: format!("unsupported scheme '{}', use http or https", url.scheme()),
        });
    }
    Ok(raw.trim().trim_end_matches('/').to_owned())
}

/// TOML form of the config for `config show` in table/plain mode.
fn render_toml(cfg: &Config) -> Result<String, CliError> {
    toml::to_string_pretty(cfg).map_err(|e| CliError::Validation {
        field: "config".into(),
        reason: format!("failed to serialize config: {e}"),
    })
}

fn save(cfg: &Config) -> Result<(), CliError> {
    config::save_config(cfg)?;
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts, mut cfg: Config) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }

        ConfigCommand::Show => {
            let out = match global.output_format() {
                OutputFormat::Table | OutputFormat::Plain => render_toml(&cfg)?,
                format => output::render_single(&format, &cfg, |_| String::new(), |_| String::new())?,
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Init: write one profile ─────────────────────────────────
        ConfigCommand::Init => {
            let profile_name = global.profile.clone().unwrap_or_else(|| "default".into());
            let config_path = config::config_path();

            if cfg.profiles.contains_key(&profile_name)
                && !util::confirm(
                    &format!("Profile '{profile_name}' already exists. Overwrite?"),
                    &format!("overwrite profile {profile_name}"),
                    global.yes,
                )?
            {
                return Ok(());
            }

            let api_url = match global.api_url.as_deref() {
                Some(url) => url.to_owned(),
                None if std::io::stdin().is_terminal() => Input::new()
                    .with_prompt("Monitoring API URL")
                    .default(DEFAULT_API_URL.to_owned())
                    .interact_text()
                    .map_err(prompt_err)?,
                None => DEFAULT_API_URL.to_owned(),
            };

            let mut profile = Profile::new(validate_url(&api_url)?);
            if global.insecure {
                profile.insecure = Some(true);
            }
            if let Some(timeout) = global.timeout {
                profile.timeout = Some(timeout);
            }

            cfg.profiles.insert(profile_name.clone(), profile);
            if cfg.default_profile.is_none() || cfg.profiles.len() == 1 {
                cfg.default_profile = Some(profile_name.clone());
            }
            save(&cfg)?;

            if !global.quiet {
                let color = output::should_color(&global.color_mode());
                eprintln!(
                    "{}",
                    output::done(
                        &format!("Profile '{profile_name}' saved to {}", config_path.display()),
                        color
                    )
                );
            }
            Ok(())
        }

        // ── SetUrl: point the active profile elsewhere ──────────────
        ConfigCommand::SetUrl { url } => {
            let url = validate_url(&url)?;
            let profile_name = config::active_profile_name(global, &cfg);

            cfg.profiles
                .entry(profile_name.clone())
                .and_modify(|p| p.api_url.clone_from(&url))
                .or_insert_with(|| Profile::new(url.clone()));
            save(&cfg)?;

            if !global.quiet {
                let color = output::should_color(&global.color_mode());
                eprintln!(
                    "{}",
                    output::done(&format!("Profile '{profile_name}' now uses {url}"), color)
                );
            }
            Ok(())
        }
    }
}
