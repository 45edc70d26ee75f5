// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that serde attributes cannot express, such
//! as valid bind addresses, non-empty paths, and sane ranges.

use crate::diagnostic::ConfigError;
use crate::model::StillpointConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects all validation errors rather than failing fast.
pub fn validate_config(config: &StillpointConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(validation("server.host must not be empty"));
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(validation(format!(
                "server.host `{host}` is not a valid IP address or hostname"
            )));
        }
    }

    if !LOG_LEVELS.contains(&config.server.log_level.as_str()) {
        errors.push(validation(format!(
            "server.log_level `{}` is not one of: {}",
            config.server.log_level,
            LOG_LEVELS.join(", ")
        )));
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(validation("storage.database_path must not be empty"));
    }

    if !(0.0..=2.0).contains(&config.openai.temperature) {
        errors.push(validation(format!(
            "openai.temperature must be between 0.0 and 2.0, got {}",
            config.openai.temperature
        )));
    }

    if config.openai.max_tokens == 0 {
        errors.push(validation("openai.max_tokens must be at least 1"));
    }

    if config.openai.timeout_secs == 0 {
        errors.push(validation("openai.timeout_secs must be at least 1"));
    }

    if config.cache.freshness_days == 0 {
        errors.push(validation("cache.freshness_days must be at least 1"));
    }

    // limit.max_requests = 0 means "unlimited" and is valid.
    if config.limit.max_requests > 0 && config.limit.window_secs == 0 {
        errors.push(validation("limit.window_secs must be at least 1"));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn validation(message: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        message: message.into(),
    }
}
