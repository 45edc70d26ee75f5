// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the ScriptStore trait.

use async_trait::async_trait;
use tracing::debug;

use stillpoint_core::{CachedScript, NewCachedScript, ScriptStore, StillpointError};

use crate::database::{iso_days_ago, now_iso, Database};
use crate::queries;

/// SQLite-backed script cache.
///
/// Wraps a [`Database`] handle and delegates row operations to the typed
/// query module. Freshness windowing lives here: rows older than
/// `freshness_days` are invisible to `lookup` but are never deleted outside
/// an explicit `clear`.
pub struct SqliteScriptStore {
    db: Database,
    freshness_days: u32,
}

impl SqliteScriptStore {
    /// Open the store at `path` with the given freshness window in days.
    pub async fn open(path: &str, freshness_days: u32) -> Result<Self, StillpointError> {
        let db = Database::open(path).await?;
        debug!(path, freshness_days, "script store initialized");
        Ok(Self { db, freshness_days })
    }

    /// Checkpoint and release the WAL.
    pub async fn close(&self) -> Result<(), StillpointError> {
        self.db.close().await
    }

    /// The underlying database handle, for callers that need raw queries
    /// (timestamp-injected fixtures, ad-hoc inspection).
    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl ScriptStore for SqliteScriptStore {
    async fn lookup(&self, cache_key: &str) -> Result<Option<CachedScript>, StillpointError> {
        let cutoff = iso_days_ago(self.freshness_days);
        queries::scripts::fetch_fresh_and_touch(&self.db, cache_key, &cutoff, &now_iso()).await
    }

    async fn insert(&self, row: NewCachedScript) -> Result<bool, StillpointError> {
        let now = now_iso();
        queries::scripts::insert_script(&self.db, row, &now, &now).await
    }

    async fn clear(&self) -> Result<u64, StillpointError> {
        queries::scripts::clear_all(&self.db).await
    }

    async fn list(&self, limit: u32) -> Result<Vec<CachedScript>, StillpointError> {
        queries::scripts::list_recent(&self.db, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stillpoint_core::types::MeditationScript;
    use tempfile::tempdir;

    async fn open_store(freshness_days: u32) -> (SqliteScriptStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.db");
        let store = SqliteScriptStore::open(path.to_str().unwrap(), freshness_days)
            .await
            .unwrap();
        (store, dir)
    }

    fn make_row(key: &str) -> NewCachedScript {
        NewCachedScript {
            cache_key: key.to_string(),
            goal: "stress".to_string(),
            current_state: "overwhelmed".to_string(),
            duration: 15,
            experience: "intermediate".to_string(),
            time_of_day: None,
            script: MeditationScript::from_sections(
                "Find a comfortable position.".to_string(),
                "Notice the weight of your shoulders releasing.".to_string(),
                "Carry this ease with you.".to_string(),
                15,
            ),
        }
    }

    #[tokio::test]
    async fn lookup_after_insert_returns_equal_script() {
        let (store, _dir) = open_store(7).await;
        let row = make_row("round-trip");
        let expected = row.script.clone();
        assert!(store.insert(row).await.unwrap());

        let hit = store.lookup("round-trip").await.unwrap().unwrap();
        assert_eq!(hit.to_script(), expected);
        assert_eq!(hit.hit_count, 2);
        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn lookup_respects_freshness_window_boundary() {
        let (store, _dir) = open_store(7).await;

        // Just inside the window: a shade under 7 days old.
        let inside = (chrono::Utc::now() - chrono::Duration::days(7)
            + chrono::Duration::seconds(30))
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string();
        queries::scripts::insert_script(store.database(), make_row("inside"), &inside, &inside)
            .await
            .unwrap();
        assert!(store.lookup("inside").await.unwrap().is_some());

        // Just outside: 7 days and one second old.
        let outside = (chrono::Utc::now()
            - chrono::Duration::days(7)
            - chrono::Duration::seconds(1))
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string();
        queries::scripts::insert_script(store.database(), make_row("outside"), &outside, &outside)
            .await
            .unwrap();
        assert!(store.lookup("outside").await.unwrap().is_none());
        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn concurrent_inserts_leave_one_row() {
        let (store, _dir) = open_store(7).await;
        let store = std::sync::Arc::new(store);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.insert(make_row("racing")).await
            }));
        }
        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1, "exactly one insert wins the row");

        let rows = store.list(10).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].hit_count, 1, "losing inserts do not add hits");
        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn clear_then_lookup_misses() {
        let (store, _dir) = open_store(7).await;
        store.insert(make_row("gone")).await.unwrap();
        assert_eq!(store.clear().await.unwrap(), 1);
        assert!(store.lookup("gone").await.unwrap().is_none());
        store.close().await.unwrap();
    }
}
