// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Stillpoint script service.
//!
//! TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment variable overrides, and diagnostic
//! error rendering with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use stillpoint_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("listening on {}:{}", config.server.host, config.server.port);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::StillpointConfig;

/// Load configuration from the XDG hierarchy and validate it.
///
/// 1. Loads config from TOML files + env vars via Figment
/// 2. On success: runs post-deserialization validation
/// 3. On Figment error: converts to miette diagnostics with typo suggestions
pub fn load_and_validate() -> Result<StillpointConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let toml_sources = collect_toml_sources();
            Err(diagnostic::figment_to_config_errors(err, &toml_sources))
        }
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<StillpointConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut sources = Vec::new();

    if let Ok(content) = std::fs::read_to_string("stillpoint.toml") {
        let path = std::env::current_dir()
            .map(|d| d.join("stillpoint.toml").display().to_string())
            .unwrap_or_else(|_| "stillpoint.toml".to_string());
        sources.push((path, content));
    }

    if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join("stillpoint/stillpoint.toml");
        if let Ok(content) = std::fs::read_to_string(&path) {
            sources.push((path.display().to_string(), content));
        }
    }

    let system_path = std::path::Path::new("/etc/stillpoint/stillpoint.toml");
    if let Ok(content) = std::fs::read_to_string(system_path) {
        sources.push((system_path.display().to_string(), content));
    }

    sources
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_toml_loads_and_validates() {
        let config = load_and_validate_str(
            r#"
            [server]
            port = 3000

            [openai]
            api_key = "sk-test"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn unknown_key_produces_a_suggestion() {
        let errors = load_and_validate_str("[cache]\nfreshnes_days = 3\n").unwrap_err();
        let ConfigError::UnknownKey { suggestion, .. } = &errors[0] else {
            panic!("expected UnknownKey, got {:?}", errors[0]);
        };
        assert_eq!(suggestion.as_deref(), Some("freshness_days"));
    }

    #[test]
    fn semantic_violation_surfaces_after_parse() {
        let errors = load_and_validate_str("[cache]\nfreshness_days = 0\n").unwrap_err();
        assert!(errors[0].to_string().contains("freshness_days"));
    }
}
