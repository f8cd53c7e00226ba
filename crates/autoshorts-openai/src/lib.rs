// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI script drafter for the autoshorts pipeline.
//!
//! Asks a chat model for a structured short-video script using a strict
//! `json_schema` response format, then merges the returned hashtags with the
//! configured default upload tags.

pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use autoshorts_config::model::{OpenAiConfig, YoutubeConfig};
use autoshorts_core::error::AutoshortsError;
use autoshorts_core::traits::{ScriptDrafter, StageAdapter};
use autoshorts_core::types::{ScriptDraft, Stage, TrendIdea};
use serde_json::json;
use tracing::debug;

use crate::types::{ApiErrorResponse, ChatMessage, ChatRequest, ChatResponse};

const SYSTEM_PROMPT: &str = "You are a growth strategist crafting high-retention, 60-second \
vertical video scripts for YouTube Shorts. Deliver lively narration, clear scene prompts, \
and viral hooks.";

/// Script drafter backed by OpenAI chat completions.
#[derive(Debug, Clone)]
pub struct OpenAiScriptDrafter {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    youtube: YoutubeConfig,
}

impl OpenAiScriptDrafter {
    /// Creates a drafter. A missing API key is reported when drafting, not here.
    pub fn new(openai: &OpenAiConfig, youtube: &YoutubeConfig) -> Result<Self, AutoshortsError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| AutoshortsError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            api_key: openai.resolved_api_key(),
            model: openai.model.clone(),
            base_url: openai.base_url.trim_end_matches('/').to_string(),
            youtube: youtube.clone(),
        })
    }

    fn build_request(&self, topic: &TrendIdea) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(user_prompt(topic)),
            ],
            response_format: script_response_format(),
        }
    }
}

impl StageAdapter for OpenAiScriptDrafter {
    fn name(&self) -> &str {
        "openai"
    }

    fn stage(&self) -> Stage {
        Stage::Script
    }
}

#[async_trait]
impl ScriptDrafter for OpenAiScriptDrafter {
    async fn draft(&self, topic: &TrendIdea) -> Result<ScriptDraft, AutoshortsError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AutoshortsError::Config("Missing required configuration: openai.api_key".into())
        })?;

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&self.build_request(topic))
            .send()
            .await
            .map_err(|e| AutoshortsError::Provider {
                message: format!("OpenAI request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = %self.model, "chat completion response received");

        let body = response.text().await.map_err(|e| AutoshortsError::Provider {
            message: format!("failed to read OpenAI response: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => api_err.error.message,
                Err(_) => format!("OpenAI returned {status}: {body}"),
            };
            return Err(AutoshortsError::provider(message));
        }

        let completion: ChatResponse =
            serde_json::from_str(&body).map_err(|e| AutoshortsError::Provider {
                message: format!("failed to parse OpenAI response: {e}"),
                source: Some(Box::new(e)),
            })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| AutoshortsError::provider("OpenAI did not return content."))?;

        let draft: ScriptDraft =
            serde_json::from_str(&content).map_err(|e| AutoshortsError::Provider {
                message: format!("OpenAI returned an invalid script: {e}"),
                source: Some(Box::new(e)),
            })?;

        let hashtags = self.youtube.tags_with(&draft.hashtags);
        Ok(ScriptDraft { hashtags, ..draft })
    }
}

fn user_prompt(topic: &TrendIdea) -> String {
    let mut lines = vec![
        "Generate a punchy script for a 60-second viral short based on the following trend:"
            .to_string(),
        format!("Trend keyword: {}", topic.keyword),
    ];
    if let Some(context) = topic.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(format!("Related context: {context}"));
    }
    lines.extend(
        [
            "",
            "Return JSON with the following fields:",
            "- title: 70 char max.",
            "- description: 2 concise sentences with a strong CTA.",
            "- hook: a 12-word pattern interrupt opening line.",
            "- script: a numbered list of 6-8 scenes combining narration and visuals.",
            "- hashtags: array of 6 SEO-friendly hashtags.",
        ]
        .map(String::from),
    );
    lines.join("\n")
}

fn script_response_format() -> serde_json::Value {
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": "script",
            "schema": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "title": { "type": "string" },
                    "description": { "type": "string" },
                    "hook": { "type": "string" },
                    "script": { "type": "string" },
                    "hashtags": {
                        "type": "array",
                        "items": { "type": "string" },
                        "minItems": 4,
                        "maxItems": 10
                    }
                },
                "required": ["title", "description", "hook", "script", "hashtags"]
            }
        }
    })
}
