// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rate-limiter capability injected into the orchestrator.

use crate::types::RateDecision;

/// Permit/deny decision source queried before a request proceeds.
///
/// Injected rather than read from module-level state so the orchestrator is
/// testable without global reset logic.
pub trait RateLimiter: Send + Sync {
    /// Decide whether the identified caller may proceed.
    fn check(&self, caller: &str) -> RateDecision;
}

/// Limiter that permits everything. Used when no limit is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnlimitedLimiter;

impl RateLimiter for UnlimitedLimiter {
    fn check(&self, _caller: &str) -> RateDecision {
        RateDecision::Permit
    }
}
