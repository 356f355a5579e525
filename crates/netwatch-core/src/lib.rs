// netwatch-core: History pipeline between netwatch-api and consumers (CLI/TUI).

pub mod config;
pub mod convert;
pub mod display;
pub mod error;
pub mod filter;
pub mod model;
pub mod monitor;
pub mod projector;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{MonitorConfig, TlsVerification};
pub use error::CoreError;
pub use filter::{WindowTable, filter_by_window, filter_with_table};
pub use monitor::{Monitor, PurgeConfirmation};
pub use projector::{chart, project, x_labels};
pub use view::{FetchTicket, HistoryView, Selection};

pub use model::{
    ChartData, DeviceRecord, HistoryCategory, HistoryRecord, Series, SeriesColor, SessionRecord,
    SpeedtestRecord, Stamp, TimeWindow, TrafficRecord,
};

// Live readings pass through unchanged from the wire layer.
pub use netwatch_api::models::{
    HealthStatus, MachineInfo, PurgeReceipt, SessionFinished, SessionStarted, SpeedtestResult,
    TrafficSnapshot,
};
