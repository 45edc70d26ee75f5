// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Stillpoint script service.
//!
//! This crate provides the foundational error type, domain types, content
//! fingerprinting, and the adapter traits implemented by the storage and
//! producer crates. Everything else in the workspace depends on it.

pub mod error;
pub mod fingerprint;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::StillpointError;
pub use fingerprint::fingerprint;
pub use traits::limiter::UnlimitedLimiter;
pub use traits::{RateLimiter, ScriptProducer, ScriptStore};
pub use types::{
    Assessment, AssessmentInput, CachedScript, DEFAULT_ENVIRONMENT, Goal, MAX_PRIMER_CHARS,
    MeditationScript, NewCachedScript, RateDecision, ScriptResponse,
};
