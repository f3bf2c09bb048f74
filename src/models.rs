// src/models.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Stable identifier of a log entry. Generated once, never reused.
pub type EntryId = Uuid;

/// One title/text record managed by `LogStore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub id: EntryId,
    pub title: String,
    pub text: String,
    /// Alternate, longer label. Empty for entries written before the column existed.
    pub full_title: String,
    /// Creation order within the store; breaks ties between equal titles.
    pub seq: u64,
    pub created_at: DateTime<Utc>,
}

impl LogEntry {
    pub(crate) fn new(seq: u64, title: String, text: String, full_title: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            text,
            full_title,
            seq,
            created_at: Utc::now(),
        }
    }
}

/// Where an entry sits in its lifecycle. Deleted entries have no state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryState {
    /// Created, not yet included in a successful save.
    Pending,
    /// Included in the last successful save.
    Persisted,
}

/// A mutation recorded since the last successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingChange {
    Insert(LogEntry),
    Delete(EntryId),
}
