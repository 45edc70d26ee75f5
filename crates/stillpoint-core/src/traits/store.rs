// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage trait for the persistent script cache.

use async_trait::async_trait;

use crate::error::StillpointError;
use crate::types::{CachedScript, NewCachedScript};

/// Persistent, content-addressed store of previously generated scripts.
///
/// Implementations enforce at-most-one-row-per-key via a uniqueness
/// constraint on the cache key; that constraint is the only concurrency
/// control the system needs. Freshness windowing is the store's concern:
/// `lookup` never returns stale rows, and stale rows are not proactively
/// deleted (only `clear` removes rows).
#[async_trait]
pub trait ScriptStore: Send + Sync {
    /// Return the fresh row for the key, if any.
    ///
    /// Side effect on hit: increments `hit_count` and touches
    /// `last_accessed`. The returned row reflects the incremented count.
    async fn lookup(&self, cache_key: &str) -> Result<Option<CachedScript>, StillpointError>;

    /// Insert a new row with `hit_count = 1`.
    ///
    /// A unique-key conflict from a racing insert is not an error; the
    /// return value reports whether this call won the row.
    async fn insert(&self, row: NewCachedScript) -> Result<bool, StillpointError>;

    /// Delete all rows, returning how many were removed. Administrative.
    async fn clear(&self) -> Result<u64, StillpointError>;

    /// Most-recent-first listing for diagnostics.
    async fn list(&self, limit: u32) -> Result<Vec<CachedScript>, StillpointError>;
}
