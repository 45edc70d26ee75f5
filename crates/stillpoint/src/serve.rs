// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `stillpoint serve` command implementation, plus the cache admin commands.
//!
//! Wires configuration into the SQLite cache, the OpenAI producer, the
//! rate limiter, and the HTTP gateway.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{info, warn};

use stillpoint_config::StillpointConfig;
use stillpoint_core::{
    Assessment, MeditationScript, RateLimiter, ScriptProducer, ScriptStore, StillpointError,
    UnlimitedLimiter,
};
use stillpoint_engine::{FixedWindowLimiter, ScriptEngine};
use stillpoint_gateway::{AppState, ServerConfig, start_server};
use stillpoint_openai::{OpenAiClient, OpenAiProducer};
use stillpoint_storage::SqliteScriptStore;

/// Producer used when no API key is configured. Every call fails, so the
/// orchestrator serves cached or fallback scripts for all requests.
struct DisabledProducer;

#[async_trait]
impl ScriptProducer for DisabledProducer {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn generate(
        &self,
        _assessment: &Assessment,
        _primer: &str,
    ) -> Result<MeditationScript, StillpointError> {
        Err(StillpointError::Producer {
            message: "no API key configured".into(),
            source: None,
        })
    }
}

/// Runs the `stillpoint serve` command.
pub async fn run_serve(config: StillpointConfig) -> Result<(), StillpointError> {
    init_tracing(&config.server.log_level);

    info!("starting stillpoint serve");

    let store = Arc::new(
        SqliteScriptStore::open(&config.storage.database_path, config.cache.freshness_days)
            .await?,
    );

    let producer: Arc<dyn ScriptProducer> = match &config.openai.api_key {
        Some(api_key) => {
            let client =
                OpenAiClient::new(api_key, Duration::from_secs(config.openai.timeout_secs))?;
            Arc::new(OpenAiProducer::new(
                client,
                config.openai.model.clone(),
                config.openai.max_tokens,
                config.openai.temperature,
            ))
        }
        None => {
            warn!("openai.api_key not set -- serving cached and fallback scripts only");
            Arc::new(DisabledProducer)
        }
    };

    let limiter: Arc<dyn RateLimiter> = if config.limit.max_requests > 0 {
        Arc::new(FixedWindowLimiter::new(
            config.limit.max_requests,
            Duration::from_secs(config.limit.window_secs),
        ))
    } else {
        Arc::new(UnlimitedLimiter)
    };

    let engine = Arc::new(ScriptEngine::new(
        store.clone(),
        producer,
        limiter,
        Duration::from_secs(config.openai.timeout_secs),
    ));

    let state = AppState {
        engine,
        store,
        start_time: Instant::now(),
    };
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        bearer_token: config.server.bearer_token.clone(),
    };

    start_server(&server_config, state).await
}

/// Runs `stillpoint cache clear`.
pub async fn run_cache_clear(config: &StillpointConfig) -> Result<(), StillpointError> {
    let store = open_store(config).await?;
    let deleted = store.clear().await?;
    println!("deleted {deleted} cached script(s)");
    store.close().await
}

/// Runs `stillpoint cache list`.
pub async fn run_cache_list(config: &StillpointConfig, limit: u32) -> Result<(), StillpointError> {
    let store = open_store(config).await?;
    let rows = store.list(limit).await?;
    if rows.is_empty() {
        println!("cache is empty");
    }
    for row in &rows {
        println!(
            "{}  goal={} duration={}m hits={} created={}",
            row.cache_key, row.goal, row.duration, row.hit_count, row.created_at
        );
    }
    store.close().await
}

async fn open_store(config: &StillpointConfig) -> Result<SqliteScriptStore, StillpointError> {
    SqliteScriptStore::open(&config.storage.database_path, config.cache.freshness_days).await
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("stillpoint={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
