// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Script-cache row operations.

use rusqlite::params;
use stillpoint_core::StillpointError;

use crate::database::Database;
use crate::models::{CachedScript, NewCachedScript};

const ROW_COLUMNS: &str = "cache_key, goal, current_state, duration, experience, time_of_day,
     intro_text, main_content, closing_text, total_words, estimated_duration,
     hit_count, created_at, last_accessed";

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CachedScript> {
    Ok(CachedScript {
        cache_key: row.get(0)?,
        goal: row.get(1)?,
        current_state: row.get(2)?,
        duration: row.get(3)?,
        experience: row.get(4)?,
        time_of_day: row.get(5)?,
        intro_text: row.get(6)?,
        main_content: row.get(7)?,
        closing_text: row.get(8)?,
        total_words: row.get(9)?,
        estimated_duration: row.get(10)?,
        hit_count: row.get(11)?,
        created_at: row.get(12)?,
        last_accessed: row.get(13)?,
    })
}

/// Fetch the fresh row for a key and record the hit.
///
/// Atomically selects the row with `created_at` strictly after `cutoff`,
/// increments its `hit_count`, and touches `last_accessed`. Returns `None`
/// when no row exists or only a stale one does. The returned row carries
/// the incremented count.
pub async fn fetch_fresh_and_touch(
    db: &Database,
    cache_key: &str,
    cutoff: &str,
    now: &str,
) -> Result<Option<CachedScript>, StillpointError> {
    let cache_key = cache_key.to_string();
    let cutoff = cutoff.to_string();
    let now = now.to_string();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;

            let result = {
                let mut stmt = tx.prepare(&format!(
                    "SELECT {ROW_COLUMNS} FROM script_cache
                     WHERE cache_key = ?1 AND created_at > ?2"
                ))?;
                stmt.query_row(params![cache_key, cutoff], read_row)
            };

            match result {
                Ok(row) => {
                    tx.execute(
                        "UPDATE script_cache
                         SET hit_count = hit_count + 1, last_accessed = ?2
                         WHERE cache_key = ?1",
                        params![cache_key, now],
                    )?;
                    tx.commit()?;
                    Ok(Some(CachedScript {
                        hit_count: row.hit_count + 1,
                        last_accessed: now,
                        ..row
                    }))
                }
                Err(rusqlite::Error::QueryReturnedNoRows) => {
                    tx.commit()?;
                    Ok(None)
                }
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert a new cache row with `hit_count = 1`.
///
/// A unique-key conflict from a racing insert is swallowed by
/// `ON CONFLICT DO NOTHING`; the return value reports whether a row was
/// actually written.
pub async fn insert_script(
    db: &Database,
    row: NewCachedScript,
    created_at: &str,
    last_accessed: &str,
) -> Result<bool, StillpointError> {
    let created_at = created_at.to_string();
    let last_accessed = last_accessed.to_string();
    db.connection()
        .call(move |conn| {
            let inserted = conn.execute(
                "INSERT INTO script_cache
                   (cache_key, goal, current_state, duration, experience, time_of_day,
                    intro_text, main_content, closing_text, total_words,
                    estimated_duration, hit_count, created_at, last_accessed)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, 1, ?12, ?13)
                 ON CONFLICT(cache_key) DO NOTHING",
                params![
                    row.cache_key,
                    row.goal,
                    row.current_state,
                    row.duration,
                    row.experience,
                    row.time_of_day,
                    row.script.intro_text,
                    row.script.main_content,
                    row.script.closing_text,
                    row.script.total_words,
                    row.script.estimated_duration,
                    created_at,
                    last_accessed,
                ],
            )?;
            Ok(inserted > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete all cache rows. Returns the number of deleted rows.
pub async fn clear_all(db: &Database) -> Result<u64, StillpointError> {
    db.connection()
        .call(|conn| {
            let deleted = conn.execute("DELETE FROM script_cache", [])?;
            Ok(deleted as u64)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List the most recently created rows, newest first.
pub async fn list_recent(db: &Database, limit: u32) -> Result<Vec<CachedScript>, StillpointError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ROW_COLUMNS} FROM script_cache
                 ORDER BY created_at DESC, rowid DESC
                 LIMIT ?1"
            ))?;
            let rows = stmt.query_map(params![limit], read_row)?;
            let mut scripts = Vec::new();
            for row in rows {
                scripts.push(row?);
            }
            Ok(scripts)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
