// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a complete service stack: temp SQLite cache,
//! mock producer, limiter, and the orchestrator.

use std::sync::Arc;
use std::time::Duration;

use stillpoint_core::{RateLimiter, StillpointError, UnlimitedLimiter};
use stillpoint_engine::{FixedWindowLimiter, ScriptEngine};
use stillpoint_storage::SqliteScriptStore;

use crate::mock_producer::{MockProducer, ProducerOutcome};

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    outcomes: Vec<ProducerOutcome>,
    always_failing: bool,
    freshness_days: u32,
    rate_limit: Option<(u32, Duration)>,
    producer_timeout: Duration,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            outcomes: Vec::new(),
            always_failing: false,
            freshness_days: 7,
            rate_limit: None,
            producer_timeout: Duration::from_secs(5),
        }
    }

    /// Queue producer outcomes, popped in order.
    pub fn with_outcomes(mut self, outcomes: Vec<ProducerOutcome>) -> Self {
        self.outcomes = outcomes;
        self
    }

    /// Make every producer call fail.
    pub fn with_failing_producer(mut self) -> Self {
        self.always_failing = true;
        self
    }

    /// Override the cache freshness window.
    pub fn with_freshness_days(mut self, days: u32) -> Self {
        self.freshness_days = days;
        self
    }

    /// Enable a fixed-window rate limit.
    pub fn with_rate_limit(mut self, max_requests: u32, window: Duration) -> Self {
        self.rate_limit = Some((max_requests, window));
        self
    }

    /// Override the producer timeout.
    pub fn with_producer_timeout(mut self, timeout: Duration) -> Self {
        self.producer_timeout = timeout;
        self
    }

    /// Build the harness, creating the temp database and all subsystems.
    pub async fn build(self) -> Result<TestHarness, StillpointError> {
        let temp_dir = tempfile::TempDir::new()
            .map_err(|e| StillpointError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db").to_string_lossy().to_string();

        let store = Arc::new(SqliteScriptStore::open(&db_path, self.freshness_days).await?);

        let producer = Arc::new(if self.always_failing {
            MockProducer::always_failing()
        } else {
            MockProducer::with_outcomes(self.outcomes)
        });

        let limiter: Arc<dyn RateLimiter> = match self.rate_limit {
            Some((max, window)) => Arc::new(FixedWindowLimiter::new(max, window)),
            None => Arc::new(UnlimitedLimiter),
        };

        let engine = Arc::new(ScriptEngine::new(
            store.clone(),
            producer.clone(),
            limiter,
            self.producer_timeout,
        ));

        Ok(TestHarness {
            engine,
            store,
            producer,
            _temp_dir: temp_dir,
        })
    }
}

/// A fully wired service stack backed by a temp database.
pub struct TestHarness {
    /// The orchestrator under test.
    pub engine: Arc<ScriptEngine>,
    /// Direct store handle for seeding and inspection.
    pub store: Arc<SqliteScriptStore>,
    /// The mock producer, for call-count assertions.
    pub producer: Arc<MockProducer>,
    // Dropping this deletes the database.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Start building a harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stillpoint_core::AssessmentInput;

    fn input() -> AssessmentInput {
        AssessmentInput {
            goal: Some("stress".into()),
            current_state: Some("overwhelmed".into()),
            duration: Some(15),
            experience: Some("intermediate".into()),
            environment: None,
            time_of_day: None,
        }
    }

    #[tokio::test]
    async fn harness_serves_a_request_end_to_end() {
        let harness = TestHarness::builder().build().await.unwrap();
        let resp = harness.engine.handle("t", &input(), None).await.unwrap();
        assert!(!resp.cached);
        assert_eq!(harness.producer.call_count(), 1);

        let again = harness.engine.handle("t", &input(), None).await.unwrap();
        assert!(again.cached);
        assert_eq!(harness.producer.call_count(), 1);
    }
}
