// ── Domain model ──
//
// Normalized history records, the selectors that pick them (category and
// time window), and the chart series projected from them.

pub mod category;
pub mod record;
pub mod series;

pub use category::{HistoryCategory, TimeWindow};
pub use record::{
    DeviceRecord, HistoryRecord, SessionRecord, SpeedtestRecord, Stamp, TrafficRecord,
};
pub use series::{ChartData, Series, SeriesColor};
