// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! XDG hierarchy: `./stillpoint.toml` > `~/.config/stillpoint/stillpoint.toml`
//! > `/etc/stillpoint/stillpoint.toml`, with `STILLPOINT_` environment
//! variable overrides on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::StillpointConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/stillpoint/stillpoint.toml` (system-wide)
/// 3. `~/.config/stillpoint/stillpoint.toml` (user XDG config)
/// 4. `./stillpoint.toml` (local directory)
/// 5. `STILLPOINT_*` environment variables
pub fn load_config() -> Result<StillpointConfig, figment::Error> {
    base_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and for callers that supply their own TOML.
pub fn load_config_from_str(toml_content: &str) -> Result<StillpointConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StillpointConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<StillpointConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StillpointConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

fn base_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(StillpointConfig::default()))
        .merge(Toml::file("/etc/stillpoint/stillpoint.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("stillpoint/stillpoint.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("stillpoint.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so underscore-containing
/// key names stay unambiguous: `STILLPOINT_SERVER_BEARER_TOKEN` must map to
/// `server.bearer_token`, not `server.bearer.token`.
fn env_provider() -> Env {
    Env::prefixed("STILLPOINT_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped,
        // e.g. STILLPOINT_SERVER_BEARER_TOKEN -> "server_bearer_token".
        let mapped = key
            .as_str()
            .replacen("server_", "server.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("openai_", "openai.", 1)
            .replacen("cache_", "cache.", 1)
            .replacen("limit_", "limit.", 1);
        mapped.into()
    })
}
