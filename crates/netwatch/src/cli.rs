//! Clap derive structures for the `netwatch` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Only clap types appear here so `build.rs` can include this file to
//! render man pages.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// netwatch -- query and chart a home network monitoring server
#[derive(Debug, Parser)]
#[command(
    name = "netwatch",
    version,
    about = "Inspect network monitoring history from the command line",
    long_about = "A CLI for a network monitoring server.\n\n\
        Lists and charts stored device, speed test, traffic and session\n\
        history, triggers live scans and speed tests, and manages usage sessions.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Server profile to use
    #[arg(long, short = 'p', env = "NETWATCH_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, short = 'u', env = "NETWATCH_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "NETWATCH_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "NETWATCH_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds [default: from profile, else 30]
    #[arg(long, env = "NETWATCH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Time window for history and charts [default: from config, else all]
    #[arg(long, short = 'w', env = "NETWATCH_WINDOW", global = true)]
    pub window: Option<WindowArg>,
}

impl GlobalOpts {
    pub fn output_format(&self) -> OutputFormat {
        self.output.clone().unwrap_or(OutputFormat::Table)
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color.clone().unwrap_or(ColorMode::Auto)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── History selectors ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    /// Registered devices
    #[value(alias = "dispositivos")]
    Devices,
    /// Speed test results
    Speedtest,
    /// Traffic samples
    #[value(alias = "trafego")]
    Traffic,
    /// Usage sessions
    #[value(alias = "sessoes")]
    Sessions,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum WindowArg {
    /// Everything stored
    All,
    /// Last 5 minutes
    #[value(name = "5min", alias = "5m")]
    Last5Min,
    /// Last 30 minutes
    #[value(name = "30min", alias = "30m")]
    Last30Min,
    /// Last hour
    #[value(name = "1h", alias = "hour")]
    LastHour,
    /// Last 7 days
    #[value(name = "1week", alias = "week")]
    LastWeek,
    /// Last 30 days
    #[value(name = "1month", alias = "month")]
    LastMonth,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List stored history records for a category
    #[command(alias = "hist")]
    History(HistoryArgs),

    /// Show the chart series for a category
    Chart(ChartArgs),

    /// Delete all stored history for a category (irreversible)
    Purge(PurgeArgs),

    /// Check the server is up and identify its host
    Status,

    /// Discover devices on the network
    #[command(alias = "dev")]
    Devices(DevicesArgs),

    /// Read current traffic counters (also records a sample)
    Traffic,

    /// Run a speed test on the server
    #[command(alias = "speed")]
    Speedtest,

    /// Start or stop a usage session
    Session(SessionArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── History ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// History category
    pub category: CategoryArg,

    /// Fail with a non-zero exit code when the server cannot be read,
    /// instead of printing an empty list
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct ChartArgs {
    /// History category
    pub category: CategoryArg,
}

#[derive(Debug, Args)]
pub struct PurgeArgs {
    /// History category to delete
    pub category: CategoryArg,
}

// ── Live ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// Run an ARP scan and register what answers
    Scan,
    /// List devices on the server's subnet
    Subnet,
}

#[derive(Debug, Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Open a session at the current counters
    Start,
    /// Close the open session and record its totals
    #[command(alias = "finish")]
    Stop,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,
    /// Show the effective configuration
    Show,
    /// Write a config file with one profile
    Init,
    /// Set the API URL of the active profile
    SetUrl {
        /// New API base URL
        url: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
