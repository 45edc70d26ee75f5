// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request orchestration for the Stillpoint script service: validation,
//! per-caller rate limiting, and the cache/produce/fallback decision flow.

pub mod limit;
pub mod orchestrator;
pub mod validate;

pub use limit::FixedWindowLimiter;
pub use orchestrator::ScriptEngine;
pub use validate::{validate_assessment, validate_primer};
