// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-stage parser for raw producer output.
//!
//! Stage one looks for the three requested section labels; stage two falls
//! back to blank-line paragraph splitting. Neither stage can fail: whatever
//! sections cannot be recovered come back as empty strings, and the caller
//! decides what emptiness means.

use crate::prompt::{CLOSING_LABEL, INTRO_LABEL, MAIN_LABEL};

/// The three recovered sections. Any of them may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptSections {
    pub intro: String,
    pub main: String,
    pub closing: String,
}

/// Parse raw model output into sections. Total: never errors.
pub fn parse_script(raw: &str) -> ScriptSections {
    if let Some(sections) = try_labeled(raw) {
        return sections;
    }
    split_paragraphs(raw)
}

/// Strict parse: all three labels present, in order.
fn try_labeled(raw: &str) -> Option<ScriptSections> {
    let intro_at = find_label(raw, 0, INTRO_LABEL)?;
    let main_at = find_label(raw, intro_at + INTRO_LABEL.len(), MAIN_LABEL)?;
    let closing_at = find_label(raw, main_at + MAIN_LABEL.len(), CLOSING_LABEL)?;

    let intro = raw[intro_at + INTRO_LABEL.len()..main_at].trim();
    let main = raw[main_at + MAIN_LABEL.len()..closing_at].trim();
    let closing = raw[closing_at + CLOSING_LABEL.len()..].trim();
    Some(ScriptSections {
        intro: intro.to_string(),
        main: main.to_string(),
        closing: closing.to_string(),
    })
}

/// Byte offset of the first ASCII-case-insensitive occurrence of `label` at
/// or after `from`. Searching the raw bytes keeps every offset valid for
/// slicing `raw`; the labels are pure ASCII, so a match always starts and
/// ends on a char boundary even when the surrounding text is multibyte.
fn find_label(raw: &str, from: usize, label: &str) -> Option<usize> {
    let needle = label.as_bytes();
    raw.as_bytes()
        .get(from..)?
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
        .map(|i| from + i)
}

/// Heuristic parse: first paragraph to intro, last to closing, middle to main.
///
/// With fewer paragraphs than sections the trailing sections stay empty.
fn split_paragraphs(raw: &str) -> ScriptSections {
    let paragraphs: Vec<&str> = raw
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    match paragraphs.as_slice() {
        [] => ScriptSections::default(),
        [only] => ScriptSections {
            intro: (*only).to_string(),
            ..Default::default()
        },
        [first, last] => ScriptSections {
            intro: (*first).to_string(),
            closing: (*last).to_string(),
            ..Default::default()
        },
        [first, middle @ .., last] => ScriptSections {
            intro: (*first).to_string(),
            main: middle.join("\n\n"),
            closing: (*last).to_string(),
        },
    }
}
