// ── History view state ──
//
// What a dashboard shows: the selected category and window, the records
// last fetched for that category, and a generation counter so that a slow
// response for an earlier selection can never overwrite a newer one.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::filter::{WindowTable, filter_with_table};
use crate::model::{ChartData, HistoryCategory, HistoryRecord, TimeWindow};
use crate::projector::chart;

/// The user's current choice of category and window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub category: HistoryCategory,
    pub window: TimeWindow,
}

/// Token handed out with every fetch. Only the newest one is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    category: HistoryCategory,
    generation: u64,
}

impl FetchTicket {
    pub fn category(&self) -> HistoryCategory {
        self.category
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone)]
pub struct HistoryView {
    selection: Selection,
    records: Vec<HistoryRecord>,
    windows: WindowTable,
    issued: u64,
    pending: bool,
}

impl HistoryView {
    pub fn new(selection: Selection, windows: WindowTable) -> Self {
        Self {
            selection,
            records: Vec::new(),
            windows,
            issued: 0,
            pending: false,
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Every record of the current category, unfiltered.
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// `true` between issuing a ticket and applying its result.
    pub fn is_loading(&self) -> bool {
        self.pending
    }

    /// Switch category. Clears the records and returns the ticket for the
    /// fetch the caller must now start; `None` if nothing changed.
    pub fn select_category(&mut self, category: HistoryCategory) -> Option<FetchTicket> {
        if category == self.selection.category {
            return None;
        }
        self.selection.category = category;
        self.records.clear();
        Some(self.issue())
    }

    /// Switch window. Filtering is local, so no fetch is needed.
    pub fn select_window(&mut self, window: TimeWindow) {
        self.selection.window = window;
    }

    /// Ticket for re-fetching the current category.
    pub fn refresh(&mut self) -> FetchTicket {
        self.issue()
    }

    /// Install fetched records if `ticket` is still current.
    ///
    /// Returns `false` and drops the records when a newer ticket has been
    /// issued or the category has moved on.
    pub fn apply(&mut self, ticket: FetchTicket, records: Vec<HistoryRecord>) -> bool {
        if ticket.generation != self.issued || ticket.category != self.selection.category {
            debug!(
                category = %ticket.category,
                generation = ticket.generation,
                latest = self.issued,
                "discarding stale history response"
            );
            return false;
        }
        self.records = records;
        self.pending = false;
        true
    }

    /// Records inside the selected window at `now`.
    pub fn visible(&self, now: NaiveDateTime) -> Vec<HistoryRecord> {
        filter_with_table(&self.windows, &self.records, self.selection.window, now)
    }

    /// Chart of the visible records.
    pub fn chart(&self, now: NaiveDateTime) -> ChartData {
        chart(self.selection.category, &self.visible(now))
    }

    fn issue(&mut self) -> FetchTicket {
        self.issued += 1;
        self.pending = true;
        FetchTicket {
            category: self.selection.category,
            generation: self.issued,
        }
    }
}
