// SPDX-FileCopyrightText: 2026 Stillpoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! ScriptProducer implementation backed by the OpenAI client.

use async_trait::async_trait;
use tracing::debug;

use stillpoint_core::{Assessment, MeditationScript, ScriptProducer, StillpointError};

use crate::client::OpenAiClient;
use crate::parse::parse_script;
use crate::prompt;
use crate::types::{ChatMessage, ChatRequest};

/// Produces meditation scripts through the OpenAI chat-completions API.
pub struct OpenAiProducer {
    client: OpenAiClient,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiProducer {
    pub fn new(client: OpenAiClient, model: String, max_tokens: u32, temperature: f32) -> Self {
        Self {
            client,
            model,
            max_tokens,
            temperature,
        }
    }
}

#[async_trait]
impl ScriptProducer for OpenAiProducer {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(
        &self,
        assessment: &Assessment,
        primer: &str,
    ) -> Result<MeditationScript, StillpointError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(prompt::system_prompt()),
                ChatMessage::user(prompt::user_prompt(assessment, primer)),
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self.client.complete_chat(&request).await?;
        let raw = response.first_content().unwrap_or_default();
        if raw.trim().is_empty() {
            return Err(StillpointError::Producer {
                message: "producer returned empty content".into(),
                source: None,
            });
        }

        let sections = parse_script(raw);
        debug!(
            intro_len = sections.intro.len(),
            main_len = sections.main.len(),
            closing_len = sections.closing.len(),
            "parsed producer output"
        );
        Ok(MeditationScript::from_sections(
            sections.intro,
            sections.main,
            sections.closing,
            assessment.duration,
        ))
    }
}
