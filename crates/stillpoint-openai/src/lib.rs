// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-backed script production: chat client, prompt assembly, and the
//! three-section output parser.

pub mod client;
pub mod parse;
pub mod prompt;
pub mod provider;
pub mod types;

pub use client::OpenAiClient;
pub use parse::{ScriptSections, parse_script};
pub use provider::OpenAiProducer;
pub use types::{ChatMessage, ChatRequest, ChatResponse};
