// src/store.rs

use crate::db::SqliteStore;
use crate::error::Result;
use crate::models::{EntryId, EntryState, LogEntry, PendingChange};
use log::{debug, error, info};
use std::path::Path;
use std::time::Instant;

/// Persistence seam behind `LogStore`.
///
/// Implementations must apply a whole `commit` batch or none of it.
pub trait DurableStore {
    /// Returns every persisted entry.
    fn scan(&self) -> Result<Vec<LogEntry>>;
    /// Applies inserts and deletes-by-id atomically.
    ///
    /// Returns the `seq` each insert was stored with. A backend may raise it
    /// above the in-memory value when another writer got there first.
    fn commit(&mut self, changes: &[PendingChange]) -> Result<Vec<(EntryId, u64)>>;
}

/// Owns the log entries: identity, ordering, and when they reach disk.
///
/// Mutations are kept in memory until [`LogStore::save`] commits them as one unit.
pub struct LogStore<S: DurableStore = SqliteStore> {
    backend: S,
    entries: Vec<LogEntry>,
    pending: Vec<PendingChange>,
    next_seq: u64,
}

impl LogStore<SqliteStore> {
    /// 打开（或创建）数据库文件并载入已保存的条目
    pub fn open(db_path: &Path) -> Result<Self> {
        Self::with_backend(SqliteStore::open(db_path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_backend(SqliteStore::open_in_memory()?)
    }
}

impl<S: DurableStore> LogStore<S> {
    pub fn with_backend(backend: S) -> Result<Self> {
        let entries = backend.scan()?;
        let next_seq = entries.iter().map(|e| e.seq).max().map_or(1, |max| max + 1);
        info!(
            "event=store_load module=store status=ok entries={}",
            entries.len()
        );
        Ok(Self {
            backend,
            entries,
            pending: Vec::new(),
            next_seq,
        })
    }

    /// Creates an entry and returns a copy of it. It is visible to `list` at once
    /// but only survives a restart after `save`.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        text: impl Into<String>,
        full_title: Option<String>,
    ) -> Result<LogEntry> {
        let entry = LogEntry::new(
            self.next_seq,
            title.into(),
            text.into(),
            full_title.unwrap_or_default(),
        );
        self.next_seq += 1;
        self.entries.push(entry.clone());
        self.pending.push(PendingChange::Insert(entry.clone()));
        debug!(
            "event=entry_create module=store status=ok id={} seq={}",
            entry.id, entry.seq
        );
        Ok(entry)
    }

    /// Snapshot of all live entries, ascending by title bytes, ties by creation order.
    pub fn list(&self) -> Result<Vec<LogEntry>> {
        let mut snapshot = self.entries.clone();
        snapshot.sort_by(|a, b| {
            a.title
                .as_bytes()
                .cmp(b.title.as_bytes())
                .then(a.seq.cmp(&b.seq))
        });
        Ok(snapshot)
    }

    /// Removes an entry. Unknown ids are ignored.
    pub fn delete(&mut self, id: EntryId) -> Result<()> {
        let Some(index) = self.entries.iter().position(|e| e.id == id) else {
            debug!("event=entry_delete module=store status=skipped id={}", id);
            return Ok(());
        };

        let was_pending = self.state(id) == Some(EntryState::Pending);
        self.entries.remove(index);
        if was_pending {
            // never written, so drop the insert instead of queueing a delete
            self.pending
                .retain(|change| !matches!(change, PendingChange::Insert(e) if e.id == id));
        } else {
            self.pending.push(PendingChange::Delete(id));
        }
        debug!(
            "event=entry_delete module=store status=ok id={} was_pending={}",
            id, was_pending
        );
        Ok(())
    }

    /// Commits every pending change in one unit. On failure nothing is
    /// dropped; calling `save` again retries the same batch.
    pub fn save(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let started_at = Instant::now();
        match self.backend.commit(&self.pending) {
            Ok(assigned) => {
                info!(
                    "event=store_save module=store status=ok pending={} duration_ms={}",
                    self.pending.len(),
                    started_at.elapsed().as_millis()
                );
                self.pending.clear();
                for (id, seq) in assigned {
                    if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
                        entry.seq = seq;
                    }
                    self.next_seq = self.next_seq.max(seq + 1);
                }
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_save module=store status=error pending={} error={}",
                    self.pending.len(),
                    err
                );
                Err(err)
            }
        }
    }

    pub fn state(&self, id: EntryId) -> Option<EntryState> {
        if !self.entries.iter().any(|e| e.id == id) {
            return None;
        }
        let pending_insert = self
            .pending
            .iter()
            .any(|change| matches!(change, PendingChange::Insert(e) if e.id == id));
        Some(if pending_insert {
            EntryState::Pending
        } else {
            EntryState::Persisted
        })
    }

    pub fn has_unsaved_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
