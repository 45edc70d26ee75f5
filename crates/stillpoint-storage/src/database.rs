// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use stillpoint_core::StillpointError;
use tracing::debug;

/// Handle to the SQLite database behind the script cache.
///
/// Wraps a single `tokio_rusqlite::Connection`; query modules accept
/// `&Database` and go through [`Database::connection`].
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (creating if needed) the database at `path`, apply PRAGMAs, and
    /// run pending migrations.
    pub async fn open(path: &str) -> Result<Self, StillpointError> {
        // Migrations run on a short-lived blocking connection so refinery's
        // error type never crosses the tokio-rusqlite closure boundary.
        let migrate_path = path.to_string();
        tokio::task::spawn_blocking(move || -> Result<(), StillpointError> {
            let mut conn =
                rusqlite::Connection::open(&migrate_path).map_err(map_sqlite_err)?;
            conn.execute_batch(
                "PRAGMA journal_mode = WAL;
                 PRAGMA synchronous = NORMAL;
                 PRAGMA busy_timeout = 5000;
                 PRAGMA foreign_keys = ON;",
            )
            .map_err(map_sqlite_err)?;
            crate::migrations::run_migrations(&mut conn)
        })
        .await
        .map_err(|e| StillpointError::Internal(format!("migration task panicked: {e}")))??;

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(map_sqlite_err)?;
        conn.call(|conn| {
            conn.execute_batch(
                "PRAGMA busy_timeout = 5000;
                 PRAGMA foreign_keys = ON;",
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path, "database opened");
        Ok(Self { conn })
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL. Called on shutdown.
    pub async fn close(&self) -> Result<(), StillpointError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// ISO-8601 UTC timestamp with millisecond precision.
///
/// Fixed-width format so timestamps compare correctly as strings; the
/// freshness window is evaluated with plain lexicographic comparison.
pub fn now_iso() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}

/// Timestamp `days` days before now, same format as [`now_iso`].
pub fn iso_days_ago(days: u32) -> String {
    (chrono::Utc::now() - chrono::Duration::days(i64::from(days)))
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}

pub(crate) fn map_tr_err(e: tokio_rusqlite::Error) -> StillpointError {
    StillpointError::Storage {
        source: Box::new(e),
    }
}

pub(crate) fn map_sqlite_err(e: rusqlite::Error) -> StillpointError {
    StillpointError::Storage {
        source: Box::new(e),
    }
}
