//! All possible UI actions. Actions are the sole mechanism for state mutation.

use netwatch_core::{FetchTicket, HistoryCategory, HistoryRecord, PurgeConfirmation, TimeWindow};

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A status-line message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    // ── App lifecycle ──
    Quit,
    Tick,
    Render,
    ToggleHelp,

    // ── Selection ──
    SelectCategory(HistoryCategory),
    SelectWindow(TimeWindow),
    Refresh,

    // ── Data ──
    /// Start a history fetch for this ticket.
    Fetch(FetchTicket),
    /// A fetch finished. The view decides whether it is still wanted.
    HistoryLoaded {
        ticket: FetchTicket,
        records: Vec<HistoryRecord>,
    },

    // ── Purge ──
    /// The user confirmed the modal; send the delete.
    Purge(PurgeConfirmation),
    PurgeFinished {
        category: HistoryCategory,
        result: Result<String, String>,
    },

    // ── Notifications ──
    Notify(Notification),
}
