// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical row types are defined in `stillpoint-core::types` for use
//! across the store trait boundary. This module re-exports them for
//! convenience within the storage crate.

pub use stillpoint_core::types::{CachedScript, NewCachedScript};
