// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the Stillpoint workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Maximum accepted length of the free-text prompt primer, in characters.
pub const MAX_PRIMER_CHARS: usize = 1000;

/// Environment applied when the caller does not supply one.
pub const DEFAULT_ENVIRONMENT: &str = "quiet";

/// Meditation goals with a dedicated fallback script bank.
///
/// Wire requests carry the goal as a free string; this enum only classifies
/// it for fallback selection. Unrecognized goals fall back to `Relaxation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Sleep,
    Stress,
    Anxiety,
    Focus,
    Energy,
    Relaxation,
}

impl Goal {
    /// Classify a free-form goal string, defaulting to `Relaxation`.
    pub fn classify(goal: &str) -> Self {
        goal.trim().parse().unwrap_or(Goal::Relaxation)
    }
}

/// Raw assessment as received on the wire (camelCase JSON).
///
/// All fields are optional so that validation can name the missing field in
/// its error message instead of surfacing a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentInput {
    /// What the session should help with (e.g. "sleep", "stress").
    #[serde(default)]
    pub goal: Option<String>,
    /// How the user currently feels.
    #[serde(default)]
    pub current_state: Option<String>,
    /// Requested session length in minutes.
    #[serde(default)]
    pub duration: Option<u32>,
    /// Meditation experience level (e.g. "beginner").
    #[serde(default)]
    pub experience: Option<String>,
    /// Listening environment. Defaults to "quiet" when absent.
    #[serde(default)]
    pub environment: Option<String>,
    /// Informational only; never part of the cache key.
    #[serde(default)]
    pub time_of_day: Option<String>,
}

/// A validated assessment. Immutable for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub goal: String,
    pub current_state: String,
    pub duration: u32,
    pub experience: String,
    pub environment: String,
    pub time_of_day: Option<String>,
}

/// The three-part meditation script returned to callers.
///
/// Produced uniformly by cache deserialization, producer output parsing, and
/// the fallback bank, so the orchestrator treats all three sources alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeditationScript {
    pub intro_text: String,
    pub main_content: String,
    pub closing_text: String,
    /// Whitespace-delimited token count across all three sections.
    pub total_words: u32,
    /// Echo of the requested duration in minutes.
    pub estimated_duration: u32,
}

impl MeditationScript {
    /// Assemble a script from its sections, computing the word count.
    pub fn from_sections(
        intro_text: String,
        main_content: String,
        closing_text: String,
        estimated_duration: u32,
    ) -> Self {
        let total_words = word_count(&[&intro_text, &main_content, &closing_text]);
        Self {
            intro_text,
            main_content,
            closing_text,
            total_words,
            estimated_duration,
        }
    }
}

/// Count whitespace-delimited tokens across the given sections.
pub fn word_count(sections: &[&str]) -> u32 {
    sections
        .iter()
        .map(|s| s.split_whitespace().count())
        .sum::<usize>() as u32
}

/// Uniform response envelope for script requests.
///
/// `cached` distinguishes a cache hit from a fresh compute; fallback scripts
/// report `cached: false`, indistinguishable from live generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptResponse {
    pub script: MeditationScript,
    pub cached: bool,
    pub cache_key: String,
}

/// A persisted script-cache row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedScript {
    pub cache_key: String,
    pub goal: String,
    pub current_state: String,
    pub duration: u32,
    pub experience: String,
    pub time_of_day: Option<String>,
    pub intro_text: String,
    pub main_content: String,
    pub closing_text: String,
    pub total_words: u32,
    pub estimated_duration: u32,
    pub hit_count: u32,
    pub created_at: String,
    pub last_accessed: String,
}

impl CachedScript {
    /// Project the row back into the value object served to callers.
    pub fn to_script(&self) -> MeditationScript {
        MeditationScript {
            intro_text: self.intro_text.clone(),
            main_content: self.main_content.clone(),
            closing_text: self.closing_text.clone(),
            total_words: self.total_words,
            estimated_duration: self.estimated_duration,
        }
    }
}

/// Input for inserting a new cache row. `hit_count` starts at 1 in the store.
#[derive(Debug, Clone)]
pub struct NewCachedScript {
    pub cache_key: String,
    pub goal: String,
    pub current_state: String,
    pub duration: u32,
    pub experience: String,
    pub time_of_day: Option<String>,
    pub script: MeditationScript,
}

impl NewCachedScript {
    /// Build a row from a validated assessment and a generated script.
    pub fn from_parts(cache_key: String, assessment: &Assessment, script: MeditationScript) -> Self {
        Self {
            cache_key,
            goal: assessment.goal.clone(),
            current_state: assessment.current_state.clone(),
            duration: assessment.duration,
            experience: assessment.experience.clone(),
            time_of_day: assessment.time_of_day.clone(),
            script,
        }
    }
}

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Permit,
    Deny,
}
