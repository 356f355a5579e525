// netwatch-api: Async Rust client for the network monitoring HTTP API

pub mod client;
pub mod error;
pub mod history;
pub mod live;
pub mod models;
pub mod transport;

pub use client::MonitorClient;
pub use error::Error;
pub use history::HistoryResource;
pub use transport::{TlsMode, TransportConfig};
