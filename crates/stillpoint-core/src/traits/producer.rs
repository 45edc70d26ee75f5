// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Producer trait for external script-generation services.

use async_trait::async_trait;

use crate::error::StillpointError;
use crate::types::{Assessment, MeditationScript};

/// Adapter for the external text-generation service that turns a structured
/// assessment (plus free-text primer) into a three-part meditation script.
///
/// Implementations fail with [`StillpointError::Producer`] when the upstream
/// is unreachable, returns a non-success status, or returns empty content.
/// The orchestrator treats any failure here as a signal to serve a fallback
/// script; producers never need to degrade gracefully themselves.
#[async_trait]
pub trait ScriptProducer: Send + Sync {
    /// Short adapter name for logs (e.g. "openai").
    fn name(&self) -> &str;

    /// Generate a script for the given assessment and primer.
    async fn generate(
        &self,
        assessment: &Assessment,
        primer: &str,
    ) -> Result<MeditationScript, StillpointError>;
}
