//! Screen components.

pub mod history;

pub use history::HistoryScreen;
