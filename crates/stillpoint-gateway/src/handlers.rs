// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the script API.
//!
//! Handles POST /v1/scripts, the admin cache endpoints, and GET /health.

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use stillpoint_core::{AssessmentInput, CachedScript, StillpointError};

use crate::server::AppState;

/// Default diagnostics listing size when the caller gives no `limit`.
const DEFAULT_LIST_LIMIT: u32 = 20;
/// Upper bound on the listing size; larger requests are clamped.
const MAX_LIST_LIMIT: u32 = 100;

/// Request body for POST /v1/scripts.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateScriptRequest {
    /// The structured assessment. Field presence is validated downstream so
    /// errors can name the missing field.
    pub assessment: AssessmentInput,
    /// Optional free-text steering for generation. At most 1000 characters.
    #[serde(default)]
    pub prompt_primer: Option<String>,
}

/// Response body for POST /v1/admin/cache/clear.
#[derive(Debug, Serialize)]
pub struct CacheClearResponse {
    /// Number of rows removed.
    pub deleted: u64,
}

/// Response body for GET /v1/admin/cache/entries.
#[derive(Debug, Serialize)]
pub struct CacheEntriesResponse {
    pub entries: Vec<CacheEntry>,
}

/// One cache row as listed for diagnostics. Script text is elided; the
/// listing answers "what is cached and how hot is it", not "what does it say".
#[derive(Debug, Serialize)]
pub struct CacheEntry {
    pub cache_key: String,
    pub goal: String,
    pub current_state: String,
    pub duration: u32,
    pub experience: String,
    pub total_words: u32,
    pub hit_count: u32,
    pub created_at: String,
    pub last_accessed: String,
}

impl From<CachedScript> for CacheEntry {
    fn from(row: CachedScript) -> Self {
        Self {
            cache_key: row.cache_key,
            goal: row.goal,
            current_state: row.current_state,
            duration: row.duration,
            experience: row.experience,
            total_words: row.total_words,
            hit_count: row.hit_count,
            created_at: row.created_at,
            last_accessed: row.last_accessed,
        }
    }
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Query parameters for GET /v1/admin/cache/entries.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub limit: Option<u32>,
}

/// POST /v1/scripts
pub async fn post_scripts(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<GenerateScriptRequest>,
) -> Response {
    let caller = headers
        .get("x-client-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("anonymous");

    match state
        .engine
        .handle(caller, &body.assessment, body.prompt_primer.as_deref())
        .await
    {
        Ok(resp) => Json(resp).into_response(),
        Err(err) => error_response(err),
    }
}

/// POST /v1/admin/cache/clear
pub async fn post_cache_clear(State(state): State<AppState>) -> Response {
    match state.store.clear().await {
        Ok(deleted) => Json(CacheClearResponse { deleted }).into_response(),
        Err(err) => error_response(err),
    }
}

/// GET /v1/admin/cache/entries?limit=N
pub async fn get_cache_entries(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .min(MAX_LIST_LIMIT);
    match state.store.list(limit).await {
        Ok(rows) => Json(CacheEntriesResponse {
            entries: rows.into_iter().map(CacheEntry::from).collect(),
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}

/// GET /health (unauthenticated, for liveness probes)
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// Map a service error to its HTTP status and body.
fn error_response(err: StillpointError) -> Response {
    let status = match &err {
        StillpointError::Validation(_) => StatusCode::BAD_REQUEST,
        StillpointError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!(%err, "request failed");
        return (
            status,
            Json(ErrorResponse {
                error: "internal server error".to_string(),
            }),
        )
            .into_response();
    }
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}
