// src/commands.rs

use crate::error::{MylogError, Result};
use crate::models::{EntryId, EntryState, LogEntry};
use crate::store::{DurableStore, LogStore};
use chrono::Local;
use log::warn;
use serde::Serialize;
use std::collections::BTreeSet;
use std::env;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::Command;

/// 处理 'init' 命令
pub fn handle_init<S: DurableStore>(store: &LogStore<S>, db_path: &Path) -> Result<()> {
    println!("✓ Database ready at: {}", db_path.display());
    println!(
        "  {} entr{} stored.",
        store.len(),
        if store.len() == 1 { "y" } else { "ies" }
    );
    Ok(())
}

/// 处理 'add' 命令
pub fn handle_add<S: DurableStore>(
    store: &mut LogStore<S>,
    title: String,
    message: Option<String>,
    full_title: Option<String>,
) -> Result<()> {
    let text = match message {
        Some(msg) => msg,
        None => read_from_editor()?,
    };

    let entry = store.create(title, text, full_title)?;
    store.save()?;
    println!("✓ Entry recorded: {}", display_title(&entry));
    Ok(())
}

fn read_from_editor() -> Result<String> {
    let temp_file = tempfile::NamedTempFile::new()?;
    let editor = env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let status = Command::new(&editor).arg(temp_file.path()).status()?;

    if !status.success() {
        return Err(MylogError::EditorError);
    }
    let mut buf = String::new();
    temp_file.reopen()?.read_to_string(&mut buf)?;
    Ok(buf.trim_end().to_string())
}

/// 处理 'list' 命令
pub fn handle_list<S: DurableStore>(store: &LogStore<S>, json: bool) -> Result<()> {
    if json {
        println!("{}", render_json(store)?);
        return Ok(());
    }

    let entries = store.list()?;

    if entries.is_empty() {
        println!("No entries found.");
        return Ok(());
    }

    for (row, entry) in entries.iter().enumerate() {
        let created = entry.created_at.with_timezone(&Local);
        println!(
            "[{}] {}  ({})",
            row + 1,
            display_title(entry),
            created.format("%Y-%m-%d %H:%M")
        );
        if !entry.full_title.is_empty() {
            println!("  └─ {}", entry.full_title);
        }
        if !entry.text.is_empty() {
            println!("{}", entry.text.trim_end());
        }
        println!("{}", "─".repeat(40));
    }
    Ok(())
}

#[derive(Serialize)]
struct ListedEntry<'a> {
    #[serde(flatten)]
    entry: &'a LogEntry,
    state: Option<EntryState>,
}

/// 按 list() 的顺序输出 JSON 数组，每项附带条目状态
pub fn render_json<S: DurableStore>(store: &LogStore<S>) -> Result<String> {
    let entries = store.list()?;
    let listed: Vec<ListedEntry<'_>> = entries
        .iter()
        .map(|entry| ListedEntry {
            entry,
            state: store.state(entry.id),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&listed)?)
}

fn display_title(entry: &LogEntry) -> &str {
    if entry.title.is_empty() {
        "(untitled)"
    } else {
        &entry.title
    }
}

/// 解析行号范围字符串 (例如 "1,3,5-7")，行号从 1 开始，不能超过 row_count
pub fn parse_row_list(s: &str, row_count: usize) -> Result<Vec<usize>> {
    let mut rows = BTreeSet::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.contains('-') {
            let mut range_parts = part.splitn(2, '-');
            let start_str = range_parts.next().unwrap_or("").trim();
            let end_str = range_parts.next().unwrap_or("").trim();

            if start_str.is_empty() || end_str.is_empty() {
                return Err(MylogError::InvalidInput(format!("Invalid range: {}", part)));
            }
            let start = parse_row(start_str)?;
            let end = parse_row(end_str)?;

            if start > end {
                return Err(MylogError::InvalidInput(format!(
                    "Start of range {} cannot be greater than end {}",
                    start, end
                )));
            }
            // 展开前先检查上界，避免超大范围
            check_row_exists(end, row_count)?;
            rows.extend(start..=end);
        } else if !part.is_empty() {
            let row = parse_row(part)?;
            check_row_exists(row, row_count)?;
            rows.insert(row);
        }
    }
    Ok(rows.into_iter().collect())
}

fn parse_row(s: &str) -> Result<usize> {
    match s.parse::<usize>() {
        Ok(row) if row > 0 => Ok(row),
        _ => Err(MylogError::InvalidInput(format!("Invalid row: {}", s))),
    }
}

fn check_row_exists(row: usize, row_count: usize) -> Result<()> {
    if row > row_count {
        return Err(MylogError::InvalidInput(format!(
            "Row {} does not exist (there are {} entries)",
            row, row_count
        )));
    }
    Ok(())
}

/// 把显示的行号换成条目 ID；任何一行越界都整体失败
pub fn resolve_rows(snapshot: &[LogEntry], rows: &[usize]) -> Result<Vec<EntryId>> {
    rows.iter()
        .map(|&row| {
            snapshot.get(row - 1).map(|entry| entry.id).ok_or_else(|| {
                MylogError::InvalidInput(format!(
                    "Row {} does not exist (there are {} entries)",
                    row,
                    snapshot.len()
                ))
            })
        })
        .collect()
}

/// 处理 'del' 命令
pub fn handle_del<S: DurableStore>(
    store: &mut LogStore<S>,
    rows_str: &str,
    yes: bool,
) -> Result<()> {
    let snapshot = store.list()?;
    let rows = parse_row_list(rows_str, snapshot.len())?;
    if rows.is_empty() {
        println!("No valid rows to delete.");
        return Ok(());
    }

    let ids = resolve_rows(&snapshot, &rows)?;

    println!("\nYou are about to permanently delete:");
    for &row in &rows {
        println!("- [{}] {}", row, display_title(&snapshot[row - 1]));
    }

    if !yes {
        print!("Confirm deletion? (y/N): ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    for id in &ids {
        store.delete(*id)?;
    }
    if let Err(err) = store.save() {
        warn!("event=cli_delete module=cli status=error error={}", err);
        return Err(err);
    }
    println!(
        "✓ Successfully deleted {} entr{}.",
        ids.len(),
        if ids.len() == 1 { "y" } else { "ies" }
    );
    Ok(())
}
