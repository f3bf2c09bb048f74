//! Local log-entry store with a command-line front end.

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod store;

pub use db::SqliteStore;
pub use error::{MylogError, Result};
pub use models::{EntryId, EntryState, LogEntry, PendingChange};
pub use store::{DurableStore, LogStore};
