// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request validation: wire input to a validated [`Assessment`].
//!
//! Field names in error messages use the wire (camelCase) spelling so the
//! caller can match them against the JSON they sent.

use stillpoint_core::{Assessment, AssessmentInput, DEFAULT_ENVIRONMENT, MAX_PRIMER_CHARS, StillpointError};

/// Validate the wire input, producing an immutable [`Assessment`].
///
/// Checks required fields in wire order (goal, currentState, duration,
/// experience) and reports the first one missing. Absent and blank strings
/// are both treated as missing.
pub fn validate_assessment(input: &AssessmentInput) -> Result<Assessment, StillpointError> {
    let goal = required_string(&input.goal, "goal")?;
    let current_state = required_string(&input.current_state, "currentState")?;
    let duration = input
        .duration
        .ok_or_else(|| missing_field("duration"))?;
    let experience = required_string(&input.experience, "experience")?;

    if duration == 0 {
        return Err(StillpointError::Validation(
            "assessment duration must be at least 1 minute".into(),
        ));
    }

    let environment = match &input.environment {
        Some(env) if !env.trim().is_empty() => env.trim().to_string(),
        _ => DEFAULT_ENVIRONMENT.to_string(),
    };

    Ok(Assessment {
        goal,
        current_state,
        duration,
        experience,
        environment,
        time_of_day: input.time_of_day.clone(),
    })
}

/// Enforce the primer length bound. Counts characters, not bytes.
pub fn validate_primer(primer: &str) -> Result<(), StillpointError> {
    let chars = primer.chars().count();
    if chars > MAX_PRIMER_CHARS {
        return Err(StillpointError::Validation(format!(
            "prompt primer is {chars} characters, maximum is {MAX_PRIMER_CHARS}"
        )));
    }
    Ok(())
}

fn required_string(value: &Option<String>, field: &str) -> Result<String, StillpointError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(missing_field(field)),
    }
}

fn missing_field(field: &str) -> StillpointError {
    StillpointError::Validation(format!("missing required assessment field: {field}"))
}
