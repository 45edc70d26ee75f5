// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static, deterministic fallback scripts, served when the upstream script
//! producer is unreachable or errors.
//!
//! The bank is total over goal strings: unrecognized goals select the
//! relaxation entry. Fallback text has a fixed length regardless of the
//! requested duration; `estimated_duration` still echoes the request, which
//! downstream consumers use for display only.

mod bank;

use stillpoint_core::{Goal, MeditationScript};
use tracing::debug;

/// Select the fallback script for a goal, echoing the requested duration.
pub fn select(goal: &str, requested_duration: u32) -> MeditationScript {
    let classified = Goal::classify(goal);
    debug!(goal, %classified, "selecting fallback script");
    let entry = bank::entry_for(classified);
    MeditationScript::from_sections(
        entry.intro.to_string(),
        entry.main.to_string(),
        entry.closing.to_string(),
        requested_duration,
    )
}
