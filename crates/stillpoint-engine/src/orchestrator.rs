// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The request orchestrator: validate, consult the cache, generate, degrade.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use stillpoint_core::{
    AssessmentInput, NewCachedScript, RateDecision, RateLimiter, ScriptProducer, ScriptResponse,
    ScriptStore, StillpointError, fingerprint,
};

use crate::validate::{validate_assessment, validate_primer};

/// Coordinates one script request end to end.
///
/// Failure policy: validation and rate-limit errors are terminal; cache
/// read errors degrade to a miss; producer errors and timeouts degrade to a
/// fallback script; cache write errors are logged and swallowed. The only
/// surfaced errors are therefore client-caused.
pub struct ScriptEngine {
    store: Arc<dyn ScriptStore>,
    producer: Arc<dyn ScriptProducer>,
    limiter: Arc<dyn RateLimiter>,
    producer_timeout: Duration,
}

impl ScriptEngine {
    pub fn new(
        store: Arc<dyn ScriptStore>,
        producer: Arc<dyn ScriptProducer>,
        limiter: Arc<dyn RateLimiter>,
        producer_timeout: Duration,
    ) -> Self {
        Self {
            store,
            producer,
            limiter,
            producer_timeout,
        }
    }

    /// Serve one script request for the identified caller.
    pub async fn handle(
        &self,
        caller: &str,
        input: &AssessmentInput,
        primer: Option<&str>,
    ) -> Result<ScriptResponse, StillpointError> {
        if self.limiter.check(caller) == RateDecision::Deny {
            return Err(StillpointError::RateLimited {
                caller: caller.to_string(),
            });
        }

        let primer = primer.unwrap_or_default();
        let assessment = validate_assessment(input)?;
        validate_primer(primer)?;

        let cache_key = fingerprint(&assessment, primer);

        match self.store.lookup(&cache_key).await {
            Ok(Some(row)) => {
                info!(cache_key, hit_count = row.hit_count, "cache hit");
                return Ok(ScriptResponse {
                    script: row.to_script(),
                    cached: true,
                    cache_key,
                });
            }
            Ok(None) => debug!(cache_key, "cache miss"),
            Err(err) => warn!(cache_key, %err, "cache lookup failed, treating as miss"),
        }

        let script = match timeout(
            self.producer_timeout,
            self.producer.generate(&assessment, primer),
        )
        .await
        {
            Ok(Ok(script)) => {
                let row = NewCachedScript::from_parts(cache_key.clone(), &assessment, script.clone());
                match self.store.insert(row).await {
                    Ok(true) => debug!(cache_key, "cached generated script"),
                    Ok(false) => debug!(cache_key, "row already present, kept existing"),
                    Err(err) => warn!(cache_key, %err, "cache write failed, serving anyway"),
                }
                script
            }
            Ok(Err(err)) => {
                warn!(producer = self.producer.name(), %err, "generation failed, serving fallback");
                stillpoint_fallback::select(&assessment.goal, assessment.duration)
            }
            Err(_) => {
                warn!(
                    producer = self.producer.name(),
                    timeout = ?self.producer_timeout,
                    "generation timed out, serving fallback"
                );
                stillpoint_fallback::select(&assessment.goal, assessment.duration)
            }
        };

        Ok(ScriptResponse {
            script,
            cached: false,
            cache_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use stillpoint_core::{
        Assessment, CachedScript, MeditationScript, UnlimitedLimiter,
    };

    use crate::limit::FixedWindowLimiter;

    fn sample_script() -> MeditationScript {
        MeditationScript::from_sections(
            "Settle in.".into(),
            "Follow the breath.".into(),
            "Return gently.".into(),
            10,
        )
    }

    fn sample_input() -> AssessmentInput {
        AssessmentInput {
            goal: Some("sleep".into()),
            current_state: Some("tired".into()),
            duration: Some(10),
            experience: Some("beginner".into()),
            environment: None,
            time_of_day: None,
        }
    }

    /// In-memory store double with call counters. Lookup ignores freshness;
    /// freshness windowing is covered by the storage crate's own tests.
    #[derive(Default)]
    struct MemoryStore {
        rows: Mutex<HashMap<String, CachedScript>>,
        lookups: AtomicUsize,
        inserts: AtomicUsize,
        fail_lookups: bool,
        fail_inserts: bool,
    }

    impl MemoryStore {
        fn failing_lookups() -> Self {
            Self {
                fail_lookups: true,
                ..Self::default()
            }
        }

        fn failing_inserts() -> Self {
            Self {
                fail_inserts: true,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl ScriptStore for MemoryStore {
        async fn lookup(&self, cache_key: &str) -> Result<Option<CachedScript>, StillpointError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if self.fail_lookups {
                return Err(StillpointError::Internal("lookup unavailable".into()));
            }
            let mut rows = self.rows.lock().unwrap();
            Ok(rows.get_mut(cache_key).map(|row| {
                row.hit_count += 1;
                row.clone()
            }))
        }

        async fn insert(&self, row: NewCachedScript) -> Result<bool, StillpointError> {
            self.inserts.fetch_add(1, Ordering::SeqCst);
            if self.fail_inserts {
                return Err(StillpointError::Internal("insert unavailable".into()));
            }
            let mut rows = self.rows.lock().unwrap();
            if rows.contains_key(&row.cache_key) {
                return Ok(false);
            }
            let cached = CachedScript {
                cache_key: row.cache_key.clone(),
                goal: row.goal,
                current_state: row.current_state,
                duration: row.duration,
                experience: row.experience,
                time_of_day: row.time_of_day,
                intro_text: row.script.intro_text,
                main_content: row.script.main_content,
                closing_text: row.script.closing_text,
                total_words: row.script.total_words,
                estimated_duration: row.script.estimated_duration,
                hit_count: 1,
                created_at: "2026-01-01T00:00:00.000Z".into(),
                last_accessed: "2026-01-01T00:00:00.000Z".into(),
            };
            rows.insert(row.cache_key, cached);
            Ok(true)
        }

        async fn clear(&self) -> Result<u64, StillpointError> {
            let mut rows = self.rows.lock().unwrap();
            let n = rows.len() as u64;
            rows.clear();
            Ok(n)
        }

        async fn list(&self, limit: u32) -> Result<Vec<CachedScript>, StillpointError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.values().take(limit as usize).cloned().collect())
        }
    }

    enum MockBehavior {
        Succeed,
        Fail,
        Hang,
    }

    struct MockProducer {
        behavior: MockBehavior,
        calls: AtomicUsize,
    }

    impl MockProducer {
        fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ScriptProducer for MockProducer {
        fn name(&self) -> &str {
            "mock"
        }

        async fn generate(
            &self,
            _assessment: &Assessment,
            _primer: &str,
        ) -> Result<MeditationScript, StillpointError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                MockBehavior::Succeed => Ok(sample_script()),
                MockBehavior::Fail => Err(StillpointError::Producer {
                    message: "upstream unavailable".into(),
                    source: None,
                }),
                MockBehavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(sample_script())
                }
            }
        }
    }

    fn engine(store: Arc<MemoryStore>, producer: Arc<MockProducer>) -> ScriptEngine {
        ScriptEngine::new(
            store,
            producer,
            Arc::new(UnlimitedLimiter),
            Duration::from_millis(200),
        )
    }

    #[tokio::test]
    async fn miss_generates_caches_and_then_hits() {
        let store = Arc::new(MemoryStore::default());
        let producer = Arc::new(MockProducer::new(MockBehavior::Succeed));
        let engine = engine(store.clone(), producer.clone());

        let first = engine.handle("c", &sample_input(), None).await.unwrap();
        assert!(!first.cached);
        assert_eq!(first.script, sample_script());

        let second = engine.handle("c", &sample_input(), None).await.unwrap();
        assert!(second.cached);
        assert_eq!(second.cache_key, first.cache_key);
        assert_eq!(second.script, first.script);
        assert_eq!(producer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.inserts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn producer_failure_serves_a_fallback_without_caching() {
        let store = Arc::new(MemoryStore::default());
        let producer = Arc::new(MockProducer::new(MockBehavior::Fail));
        let engine = engine(store.clone(), producer.clone());

        let resp = engine.handle("c", &sample_input(), None).await.unwrap();
        assert!(!resp.cached);
        assert!(!resp.script.main_content.is_empty());
        assert_eq!(resp.script.estimated_duration, 10);
        assert_eq!(store.inserts.load(Ordering::SeqCst), 0);

        // The failure is not cached either: the next request retries.
        engine.handle("c", &sample_input(), None).await.unwrap();
        assert_eq!(producer.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn producer_timeout_serves_a_fallback() {
        let store = Arc::new(MemoryStore::default());
        let producer = Arc::new(MockProducer::new(MockBehavior::Hang));
        let engine = engine(store.clone(), producer.clone());

        let resp = engine.handle("c", &sample_input(), None).await.unwrap();
        assert!(!resp.cached);
        assert!(!resp.script.intro_text.is_empty());
        assert_eq!(store.inserts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn validation_failure_touches_neither_store_nor_producer() {
        let store = Arc::new(MemoryStore::default());
        let producer = Arc::new(MockProducer::new(MockBehavior::Succeed));
        let engine = engine(store.clone(), producer.clone());

        let mut input = sample_input();
        input.duration = None;
        let err = engine.handle("c", &input, None).await.unwrap_err();
        assert!(err.to_string().contains("duration"));
        assert_eq!(store.lookups.load(Ordering::SeqCst), 0);
        assert_eq!(producer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn over_length_primer_is_rejected_before_any_work() {
        let store = Arc::new(MemoryStore::default());
        let producer = Arc::new(MockProducer::new(MockBehavior::Succeed));
        let engine = engine(store.clone(), producer.clone());

        let primer = "x".repeat(1001);
        let err = engine
            .handle("c", &sample_input(), Some(&primer))
            .await
            .unwrap_err();
        assert!(matches!(err, StillpointError::Validation(_)));
        assert_eq!(store.lookups.load(Ordering::SeqCst), 0);
        assert_eq!(producer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_field_is_reported_before_an_over_length_primer() {
        let store = Arc::new(MemoryStore::default());
        let producer = Arc::new(MockProducer::new(MockBehavior::Succeed));
        let engine = engine(store.clone(), producer.clone());

        let mut input = sample_input();
        input.goal = None;
        let primer = "x".repeat(1001);
        let err = engine
            .handle("c", &input, Some(&primer))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("goal"), "got: {err}");
    }

    #[tokio::test]
    async fn absent_primer_and_empty_primer_share_a_cache_key() {
        let store = Arc::new(MemoryStore::default());
        let producer = Arc::new(MockProducer::new(MockBehavior::Succeed));
        let engine = engine(store.clone(), producer.clone());

        let first = engine.handle("c", &sample_input(), None).await.unwrap();
        let second = engine
            .handle("c", &sample_input(), Some(""))
            .await
            .unwrap();
        assert_eq!(first.cache_key, second.cache_key);
        assert!(second.cached);
    }

    #[tokio::test]
    async fn lookup_failure_degrades_to_a_miss() {
        let store = Arc::new(MemoryStore::failing_lookups());
        let producer = Arc::new(MockProducer::new(MockBehavior::Succeed));
        let engine = engine(store.clone(), producer.clone());

        let resp = engine.handle("c", &sample_input(), None).await.unwrap();
        assert!(!resp.cached);
        assert_eq!(resp.script, sample_script());
        assert_eq!(producer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn insert_failure_does_not_fail_the_response() {
        let store = Arc::new(MemoryStore::failing_inserts());
        let producer = Arc::new(MockProducer::new(MockBehavior::Succeed));
        let engine = engine(store.clone(), producer.clone());

        let resp = engine.handle("c", &sample_input(), None).await.unwrap();
        assert!(!resp.cached);
        assert_eq!(resp.script, sample_script());
        assert_eq!(store.inserts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rate_limited_caller_is_denied_before_validation() {
        let store = Arc::new(MemoryStore::default());
        let producer = Arc::new(MockProducer::new(MockBehavior::Succeed));
        let engine = ScriptEngine::new(
            store.clone(),
            producer.clone(),
            Arc::new(FixedWindowLimiter::new(1, Duration::from_secs(60))),
            Duration::from_millis(200),
        );

        engine.handle("c", &sample_input(), None).await.unwrap();
        let err = engine.handle("c", &sample_input(), None).await.unwrap_err();
        assert!(matches!(err, StillpointError::RateLimited { .. }));
        // A different caller still gets through.
        engine.handle("d", &sample_input(), None).await.unwrap();
    }
}
