// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed-window per-caller rate limiting.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use stillpoint_core::{RateDecision, RateLimiter};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Counts requests per caller in fixed windows. A new window starts the
/// first time a caller is seen after the previous window elapsed; counts do
/// not carry over.
pub struct FixedWindowLimiter {
    max_requests: u32,
    window: Duration,
    windows: DashMap<String, Window>,
    last_prune: Mutex<Instant>,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: DashMap::new(),
            last_prune: Mutex::new(Instant::now()),
        }
    }

    /// Drop entries whose window has elapsed, at most once per window.
    ///
    /// Must not run while an entry guard is held: `retain` locks the same
    /// shards.
    fn prune(&self, now: Instant) {
        let Ok(mut last) = self.last_prune.try_lock() else {
            return;
        };
        if now.duration_since(*last) < self.window {
            return;
        }
        *last = now;
        let before = self.windows.len();
        self.windows
            .retain(|_, window| now.duration_since(window.started) < self.window);
        debug!(
            dropped = before.saturating_sub(self.windows.len()),
            "pruned elapsed rate windows"
        );
    }
}

impl RateLimiter for FixedWindowLimiter {
    fn check(&self, caller: &str) -> RateDecision {
        let now = Instant::now();
        self.prune(now);
        let mut entry = self
            .windows
            .entry(caller.to_string())
            .or_insert(Window { started: now, count: 0 });
        if now.duration_since(entry.started) >= self.window {
            entry.started = now;
            entry.count = 0;
        }
        if entry.count >= self.max_requests {
            debug!(caller, count = entry.count, "rate limit exceeded");
            return RateDecision::Deny;
        }
        entry.count += 1;
        RateDecision::Permit
    }
}
