// ── History selectors ──

use netwatch_api::HistoryResource;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// One of the four kinds of monitored history.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum HistoryCategory {
    #[default]
    #[strum(to_string = "devices", serialize = "dispositivos")]
    Devices,
    #[strum(to_string = "speedtest")]
    Speedtest,
    #[strum(to_string = "traffic", serialize = "trafego")]
    Traffic,
    #[strum(to_string = "sessions", serialize = "sessoes")]
    Sessions,
}

impl HistoryCategory {
    pub const ALL: [Self; 4] = [Self::Devices, Self::Speedtest, Self::Traffic, Self::Sessions];

    /// Human-readable title.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Devices => "Devices",
            Self::Speedtest => "Speed Test",
            Self::Traffic => "Traffic",
            Self::Sessions => "Sessions",
        }
    }

    /// The server table backing this category.
    pub const fn resource(self) -> HistoryResource {
        match self {
            Self::Devices => HistoryResource::Devices,
            Self::Speedtest => HistoryResource::Speedtest,
            Self::Traffic => HistoryResource::Traffic,
            Self::Sessions => HistoryResource::Sessions,
        }
    }

    /// Next category in tab order, wrapping around.
    pub const fn next(self) -> Self {
        match self {
            Self::Devices => Self::Speedtest,
            Self::Speedtest => Self::Traffic,
            Self::Traffic => Self::Sessions,
            Self::Sessions => Self::Devices,
        }
    }
}

/// Relative time range restricting which records are shown.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum TimeWindow {
    #[default]
    #[serde(rename = "all")]
    #[strum(to_string = "all", serialize = "todos")]
    All,
    #[serde(rename = "5min")]
    #[strum(to_string = "5min", serialize = "5m")]
    Last5Min,
    #[serde(rename = "30min")]
    #[strum(to_string = "30min", serialize = "30m")]
    Last30Min,
    #[serde(rename = "1h")]
    #[strum(to_string = "1h", serialize = "hour")]
    LastHour,
    #[serde(rename = "1week")]
    #[strum(to_string = "1week", serialize = "week", serialize = "1semana")]
    LastWeek,
    #[serde(rename = "1month")]
    #[strum(to_string = "1month", serialize = "month", serialize = "1mes")]
    LastMonth,
}

impl TimeWindow {
    pub const ALL: [Self; 6] = [
        Self::All,
        Self::Last5Min,
        Self::Last30Min,
        Self::LastHour,
        Self::LastWeek,
        Self::LastMonth,
    ];

    /// Short label for tab bars.
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Last5Min => "5 min",
            Self::Last30Min => "30 min",
            Self::LastHour => "1 hour",
            Self::LastWeek => "1 week",
            Self::LastMonth => "1 month",
        }
    }
}
