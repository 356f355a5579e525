// ── Temporal filter ──
//
// Restricts a record list to a relative time window. Pure and synchronous:
// the cutoff table and the current instant are both parameters.

use chrono::{NaiveDateTime, TimeDelta};

use crate::model::{HistoryRecord, TimeWindow};

/// Cutoff duration for every bounded window.
///
/// "Month" is a fixed 30 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowTable {
    pub last_5_min: TimeDelta,
    pub last_30_min: TimeDelta,
    pub last_hour: TimeDelta,
    pub last_week: TimeDelta,
    pub last_month: TimeDelta,
}

impl Default for WindowTable {
    fn default() -> Self {
        Self {
            last_5_min: TimeDelta::minutes(5),
            last_30_min: TimeDelta::minutes(30),
            last_hour: TimeDelta::hours(1),
            last_week: TimeDelta::days(7),
            last_month: TimeDelta::days(30),
        }
    }
}

impl WindowTable {
    /// Cutoff for `window`; `None` for the unbounded window.
    pub fn cutoff(&self, window: TimeWindow) -> Option<TimeDelta> {
        match window {
            TimeWindow::All => None,
            TimeWindow::Last5Min => Some(self.last_5_min),
            TimeWindow::Last30Min => Some(self.last_30_min),
            TimeWindow::LastHour => Some(self.last_hour),
            TimeWindow::LastWeek => Some(self.last_week),
            TimeWindow::LastMonth => Some(self.last_month),
        }
    }

    /// Replace one cutoff. Ignored for `TimeWindow::All`.
    pub fn with_cutoff(mut self, window: TimeWindow, cutoff: TimeDelta) -> Self {
        match window {
            TimeWindow::All => {}
            TimeWindow::Last5Min => self.last_5_min = cutoff,
            TimeWindow::Last30Min => self.last_30_min = cutoff,
            TimeWindow::LastHour => self.last_hour = cutoff,
            TimeWindow::LastWeek => self.last_week = cutoff,
            TimeWindow::LastMonth => self.last_month = cutoff,
        }
        self
    }
}

/// Filter with the default cutoff table.
pub fn filter_by_window(
    records: &[HistoryRecord],
    window: TimeWindow,
    now: NaiveDateTime,
) -> Vec<HistoryRecord> {
    filter_with_table(&WindowTable::default(), records, window, now)
}

/// Keep records whose timestamp is no older than the window's cutoff.
///
/// The boundary is inclusive and there is no upper bound, so future
/// timestamps pass. Records without a parseable timestamp only pass the
/// unbounded window. Relative order is preserved.
pub fn filter_with_table(
    table: &WindowTable,
    records: &[HistoryRecord],
    window: TimeWindow,
    now: NaiveDateTime,
) -> Vec<HistoryRecord> {
    let Some(cutoff) = table.cutoff(window) else {
        return records.to_vec();
    };

    records
        .iter()
        .filter(|record| {
            record
                .timestamp()
                .is_some_and(|at| now.signed_duration_since(at) <= cutoff)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{DeviceRecord, SessionRecord, SpeedtestRecord, Stamp, TrafficRecord};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn stamp_ago(delta: TimeDelta) -> Option<Stamp> {
        Some(Stamp::parse(
            (now() - delta).format("%Y-%m-%d %H:%M:%S").to_string(),
        ))
    }

    fn traffic(ago: TimeDelta) -> HistoryRecord {
        HistoryRecord::Traffic(TrafficRecord {
            taken_at: stamp_ago(ago),
            download_mb: Some(1.0),
            upload_mb: Some(1.0),
        })
    }

    fn mixed() -> Vec<HistoryRecord> {
        vec![
            HistoryRecord::Device(DeviceRecord {
                last_checked: stamp_ago(TimeDelta::minutes(2)),
                ..DeviceRecord::default()
            }),
            HistoryRecord::Speedtest(SpeedtestRecord {
                taken_at: stamp_ago(TimeDelta::hours(2)),
                ..SpeedtestRecord::default()
            }),
            traffic(TimeDelta::days(3)),
            HistoryRecord::Session(SessionRecord::default()),
            traffic(TimeDelta::seconds(10)),
        ]
    }

    #[test]
    fn all_window_is_identity() {
        let records = mixed();
        assert_eq!(filter_by_window(&records, TimeWindow::All, now()), records);
    }

    #[test]
    fn bounded_windows_keep_an_ordered_subsequence() {
        let records = mixed();
        for window in TimeWindow::ALL {
            let kept = filter_by_window(&records, window, now());
            let mut source = records.iter();
            for record in &kept {
                assert!(source.any(|r| r == record), "order broken for {window}");
            }
        }
    }

    #[test]
    fn boundary_is_inclusive() {
        let exactly = traffic(TimeDelta::hours(1));
        let just_past = traffic(TimeDelta::hours(1) + TimeDelta::seconds(1));
        let kept = filter_by_window(
            &[exactly.clone(), just_past],
            TimeWindow::LastHour,
            now(),
        );
        assert_eq!(kept, vec![exactly]);
    }

    #[test]
    fn future_timestamps_are_kept() {
        let future = traffic(TimeDelta::minutes(-10));
        assert_eq!(
            filter_by_window(std::slice::from_ref(&future), TimeWindow::Last5Min, now()),
            vec![future]
        );
    }

    #[test]
    fn records_without_timestamp_only_pass_all() {
        let missing = HistoryRecord::Session(SessionRecord::default());
        let garbled = HistoryRecord::Traffic(TrafficRecord {
            taken_at: Some(Stamp::parse("not a date")),
            ..TrafficRecord::default()
        });
        let records = vec![missing, garbled];

        assert_eq!(filter_by_window(&records, TimeWindow::All, now()).len(), 2);
        assert!(filter_by_window(&records, TimeWindow::LastMonth, now()).is_empty());
    }

    #[test]
    fn window_sizes() {
        let records = mixed();
        let count = |w| filter_by_window(&records, w, now()).len();
        assert_eq!(count(TimeWindow::Last5Min), 2);
        assert_eq!(count(TimeWindow::Last30Min), 2);
        assert_eq!(count(TimeWindow::LastHour), 2);
        assert_eq!(count(TimeWindow::LastWeek), 4);
        assert_eq!(count(TimeWindow::LastMonth), 4);
    }

    #[test]
    fn custom_table_overrides_one_cutoff() {
        let table = WindowTable::default().with_cutoff(TimeWindow::LastHour, TimeDelta::hours(3));
        let records = mixed();
        assert_eq!(
            filter_with_table(&table, &records, TimeWindow::LastHour, now()).len(),
            3
        );
        assert_eq!(table.cutoff(TimeWindow::Last5Min), Some(TimeDelta::minutes(5)));
        assert_eq!(table.cutoff(TimeWindow::All), None);
    }
}
