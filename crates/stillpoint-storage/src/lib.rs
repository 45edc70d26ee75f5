// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Stillpoint script cache.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a single-writer
//! concurrency model via `tokio-rusqlite`, and the content-addressed script
//! cache behind the [`stillpoint_core::ScriptStore`] trait. The uniqueness
//! constraint on `cache_key` is the only concurrency control the cache needs.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

pub use adapter::SqliteScriptStore;
pub use database::Database;
pub use models::*;
