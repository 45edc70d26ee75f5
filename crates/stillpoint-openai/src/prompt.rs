// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builds the structured generation instruction from an assessment.

use stillpoint_core::Assessment;

/// Label markers the model is asked to emit; the strict parser keys on these.
pub const INTRO_LABEL: &str = "INTRO:";
pub const MAIN_LABEL: &str = "MAIN:";
pub const CLOSING_LABEL: &str = "CLOSING:";

/// System prompt fixing register and output contract.
pub fn system_prompt() -> String {
    format!(
        "You are an experienced meditation guide writing spoken scripts for a \
         narrated audio session. Write in a warm, unhurried second-person voice. \
         Respond with exactly three sections labeled {INTRO_LABEL} {MAIN_LABEL} \
         and {CLOSING_LABEL} on their own lines, with no other headings."
    )
}

/// Affirmations scale with session length: one unit per ~3 minutes.
fn affirmation_count(duration: u32) -> u32 {
    (duration / 3).max(1)
}

/// Build the user instruction for one assessment and primer.
pub fn user_prompt(assessment: &Assessment, primer: &str) -> String {
    let affirmations = affirmation_count(assessment.duration);
    let mut prompt = format!(
        "Write a {duration}-minute guided meditation script.\n\
         Goal: {goal}\n\
         The listener currently feels: {state}\n\
         Experience level: {experience}\n\
         Listening environment: {environment}\n\n\
         Requirements:\n\
         - The {INTRO_LABEL} section welcomes the listener and settles them in.\n\
         - The {MAIN_LABEL} section is the body of the practice, paced for \
           {duration} minutes of slow narration.\n\
         - The {CLOSING_LABEL} section gently ends the session.\n\
         - Include exactly {affirmations} positive affirmation(s), spread through \
           the main section.\n\
         - Include explicit breathing cues with counts (for example, inhale for \
           four, exhale for six).",
        duration = assessment.duration,
        goal = assessment.goal,
        state = assessment.current_state,
        experience = assessment.experience,
        environment = assessment.environment,
    );
    if !primer.is_empty() {
        prompt.push_str("\n\nAdditional guidance from the listener:\n");
        prompt.push_str(primer);
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assessment(duration: u32) -> Assessment {
        Assessment {
            goal: "sleep".into(),
            current_state: "restless".into(),
            duration,
            experience: "beginner".into(),
            environment: "quiet".into(),
            time_of_day: Some("evening".into()),
        }
    }

    #[test]
    fn affirmation_density_is_one_per_three_minutes() {
        assert_eq!(affirmation_count(1), 1);
        assert_eq!(affirmation_count(3), 1);
        assert_eq!(affirmation_count(10), 3);
        assert_eq!(affirmation_count(30), 10);
    }

    #[test]
    fn user_prompt_carries_all_assessment_fields() {
        let prompt = user_prompt(&assessment(10), "");
        assert!(prompt.contains("10-minute"));
        assert!(prompt.contains("Goal: sleep"));
        assert!(prompt.contains("currently feels: restless"));
        assert!(prompt.contains("Experience level: beginner"));
        assert!(prompt.contains("environment: quiet"));
        assert!(prompt.contains("exactly 3 positive affirmation(s)"));
        assert!(prompt.contains("breathing cues"));
    }

    #[test]
    fn primer_is_appended_when_present() {
        let with = user_prompt(&assessment(10), "imagery of a mountain lake");
        assert!(with.contains("mountain lake"));
        let without = user_prompt(&assessment(10), "");
        assert!(!without.contains("Additional guidance"));
    }

    #[test]
    fn prompts_request_the_three_labels() {
        let system = system_prompt();
        for label in [INTRO_LABEL, MAIN_LABEL, CLOSING_LABEL] {
            assert!(system.contains(label));
            assert!(user_prompt(&assessment(5), "").contains(label));
        }
    }
}
