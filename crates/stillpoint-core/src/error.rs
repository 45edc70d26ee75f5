// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Stillpoint script service.

use thiserror::Error;

/// The primary error type used across all Stillpoint crates.
#[derive(Debug, Error)]
pub enum StillpointError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Client-caused request errors (missing assessment fields, over-length primer).
    /// Never retried and never reach the cache or the producer.
    #[error("validation error: {0}")]
    Validation(String),

    /// The caller exceeded its request allowance.
    #[error("rate limit exceeded for caller `{caller}`")]
    RateLimited { caller: String },

    /// Storage backend errors (database connection, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Script producer errors (API unreachable, non-success status, empty output).
    #[error("producer error: {message}")]
    Producer {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl StillpointError {
    /// True for errors the orchestrator recovers from by serving a fallback
    /// script: anything the producer path can raise.
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            StillpointError::Producer { .. } | StillpointError::Timeout { .. }
        )
    }
}
