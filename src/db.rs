// src/db.rs

use crate::error::{MylogError, Result};
use crate::models::{EntryId, LogEntry, PendingChange};
use crate::store::DurableStore;
use chrono::{DateTime, Utc};
use log::{debug, error, info};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Schema upgrades, applied in order. The index + 1 is the `user_version` each one leaves behind.
const MIGRATIONS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS log_items (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        item_text TEXT NOT NULL,
        seq INTEGER NOT NULL,
        created_at TEXT NOT NULL
    );",
    // Later revision of the model; older rows read back as an empty full title.
    "ALTER TABLE log_items ADD COLUMN full_title TEXT NOT NULL DEFAULT '';",
];

/// Latest schema version this binary knows how to read.
pub fn latest_version() -> u32 {
    MIGRATIONS.len() as u32
}

/// 打开数据库文件，必要时创建父目录，并完成 schema 升级
pub fn open_connection(db_path: &Path) -> Result<Connection> {
    let started_at = Instant::now();
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let result = Connection::open(db_path)
        .map_err(MylogError::from)
        .and_then(|mut conn| bootstrap(&mut conn).map(|()| conn));
    log_open("file", started_at, &result);
    result
}

/// 打开内存数据库（测试用）
pub fn open_in_memory() -> Result<Connection> {
    let started_at = Instant::now();
    let result = Connection::open_in_memory()
        .map_err(MylogError::from)
        .and_then(|mut conn| bootstrap(&mut conn).map(|()| conn));
    log_open("memory", started_at, &result);
    result
}

fn log_open(mode: &str, started_at: Instant, result: &Result<Connection>) {
    match result {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode={} duration_ms={}",
            mode,
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode={} duration_ms={} error={}",
            mode,
            started_at.elapsed().as_millis(),
            err
        ),
    }
}

fn bootstrap(conn: &mut Connection) -> Result<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)
}

/// 按顺序应用尚未执行的 schema 升级，整体放在一个事务里
pub fn apply_migrations(conn: &mut Connection) -> Result<()> {
    let current: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let latest = latest_version();

    if current > latest {
        return Err(MylogError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }
    if current == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (index, sql) in MIGRATIONS.iter().enumerate().skip(current as usize) {
        let version = index as u32 + 1;
        tx.execute_batch(sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", version))?;
        debug!("event=db_migrate module=db status=ok version={}", version);
    }
    tx.commit()?;
    Ok(())
}

/// SQLite 持久化后端
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open(db_path: &Path) -> Result<Self> {
        open_connection(db_path).map(Self::new)
    }

    pub fn open_in_memory() -> Result<Self> {
        open_in_memory().map(Self::new)
    }
}

impl DurableStore for SqliteStore {
    fn scan(&self) -> Result<Vec<LogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, item_text, full_title, seq, created_at FROM log_items ORDER BY seq",
        )?;
        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_row(row)?);
        }
        Ok(entries)
    }

    fn commit(&mut self, changes: &[PendingChange]) -> Result<Vec<(EntryId, u64)>> {
        // 事务在出错时随 drop 回滚，要么全部写入，要么全部不写
        let tx = self.conn.transaction()?;
        // 其他进程可能已写入更大的 seq，在事务内重新取上界
        let max_seq: i64 =
            tx.query_row("SELECT COALESCE(MAX(seq), 0) FROM log_items", [], |row| row.get(0))?;
        let mut floor = u64::try_from(max_seq).unwrap_or(0);
        let mut assigned = Vec::new();

        for change in changes {
            match change {
                PendingChange::Insert(entry) => {
                    let seq = entry.seq.max(floor + 1);
                    floor = seq;
                    tx.execute(
                        "INSERT INTO log_items (id, title, item_text, full_title, seq, created_at)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                        params![
                            entry.id.to_string(),
                            entry.title,
                            entry.text,
                            entry.full_title,
                            seq as i64,
                            entry.created_at.to_rfc3339(),
                        ],
                    )?;
                    assigned.push((entry.id, seq));
                }
                PendingChange::Delete(id) => {
                    tx.execute("DELETE FROM log_items WHERE id = ?1", [id.to_string()])?;
                }
            }
        }
        tx.commit()?;
        Ok(assigned)
    }
}

fn parse_row(row: &Row<'_>) -> Result<LogEntry> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text)
        .map_err(|_| MylogError::CorruptEntry(format!("invalid id `{}`", id_text)))?;

    let seq_raw: i64 = row.get("seq")?;
    let seq = u64::try_from(seq_raw)
        .map_err(|_| MylogError::CorruptEntry(format!("negative seq {} for {}", seq_raw, id)))?;

    let created_text: String = row.get("created_at")?;
    let created_at = DateTime::parse_from_rfc3339(&created_text)
        .map_err(|_| {
            MylogError::CorruptEntry(format!("invalid timestamp `{}` for {}", created_text, id))
        })?
        .with_timezone(&Utc);

    Ok(LogEntry {
        id,
        title: row.get("title")?,
        text: row.get("item_text")?,
        full_title: row.get("full_title")?,
        seq,
        created_at,
    })
}
