// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Replicate video synthesizer for the autoshorts pipeline.
//!
//! Creates a prediction for a text-to-video model, polls it until it settles,
//! and extracts the playable video URL from the model output.

pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use autoshorts_config::model::ReplicateConfig;
use autoshorts_core::error::AutoshortsError;
use autoshorts_core::traits::{StageAdapter, VideoSynthesizer};
use autoshorts_core::types::{ScriptDraft, Stage, TrendIdea, VideoAsset};
use serde_json::Value;
use tracing::{debug, info};

use crate::types::{CreatePrediction, Prediction, PredictionStatus, VideoInput};

const VISUAL_DIRECTION: [&str; 3] = [
    "Create an eye-catching short-form 9:16 video with high energy visuals.",
    "Focus on motion graphics, animated typography, and kinetic transitions that match the narration pacing.",
    "Avoid watermarks or text overlays that clash with captions.",
];

const NEGATIVE_PROMPT: &str =
    "low quality, low resolution, blurry, watermark, text overlay, static frame";

/// Video synthesizer backed by Replicate predictions.
#[derive(Debug, Clone)]
pub struct ReplicateVideoSynthesizer {
    client: reqwest::Client,
    api_token: Option<String>,
    model: String,
    base_url: String,
    poll_interval: Duration,
    max_wait: Duration,
}

impl ReplicateVideoSynthesizer {
    /// Creates a synthesizer. A missing API token is reported when synthesizing.
    pub fn new(config: &ReplicateConfig) -> Result<Self, AutoshortsError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| AutoshortsError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            api_token: config.resolved_api_token(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            max_wait: Duration::from_secs(config.max_wait_secs),
        })
    }

    /// Overrides polling cadence (for testing with wiremock).
    #[cfg(test)]
    fn with_timing(mut self, poll_interval: Duration, max_wait: Duration) -> Self {
        self.poll_interval = poll_interval;
        self.max_wait = max_wait;
        self
    }

    async fn create_prediction(
        &self,
        token: &str,
        input: VideoInput,
    ) -> Result<Prediction, AutoshortsError> {
        let (url, version) = prediction_route(&self.base_url, &self.model)?;
        let request = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&CreatePrediction { version, input });
        send_prediction(request).await
    }

    async fn wait_for(
        &self,
        token: &str,
        mut prediction: Prediction,
    ) -> Result<Prediction, AutoshortsError> {
        while !prediction.status.is_terminal() {
            tokio::time::sleep(self.poll_interval).await;
            let url = prediction
                .urls
                .as_ref()
                .and_then(|urls| urls.get.clone())
                .unwrap_or_else(|| format!("{}/predictions/{}", self.base_url, prediction.id));
            prediction = send_prediction(self.client.get(url).bearer_auth(token)).await?;
            debug!(id = %prediction.id, status = %prediction.status, "prediction polled");
        }
        Ok(prediction)
    }
}

impl StageAdapter for ReplicateVideoSynthesizer {
    fn name(&self) -> &str {
        "replicate"
    }

    fn stage(&self) -> Stage {
        Stage::Video
    }
}

#[async_trait]
impl VideoSynthesizer for ReplicateVideoSynthesizer {
    async fn synthesize(
        &self,
        _topic: &TrendIdea,
        script: &ScriptDraft,
    ) -> Result<VideoAsset, AutoshortsError> {
        let token = self.api_token.as_deref().ok_or_else(|| {
            AutoshortsError::Config("Missing required configuration: replicate.api_token".into())
        })?;

        let created = self.create_prediction(token, video_input(script)).await?;
        info!(id = %created.id, model = %self.model, "prediction created");

        let settled = tokio::time::timeout(self.max_wait, self.wait_for(token, created))
            .await
            .map_err(|_| AutoshortsError::Timeout {
                duration: self.max_wait,
            })??;

        match settled.status {
            PredictionStatus::Succeeded => {}
            status => {
                let reason = settled
                    .error
                    .as_ref()
                    .map(|e| e.as_str().map(String::from).unwrap_or_else(|| e.to_string()))
                    .unwrap_or_else(|| "no error reported".to_string());
                return Err(AutoshortsError::provider(format!(
                    "Replicate prediction {status}: {reason}"
                )));
            }
        }

        let output = settled.output.unwrap_or(Value::Null);
        let video_url = extract_video_url(&output).ok_or_else(|| {
            AutoshortsError::provider("Replicate did not return a video output URL.")
        })?;

        Ok(VideoAsset {
            video_url,
            preview_image: None,
            provider: self.model.clone(),
            raw: Some(output),
        })
    }
}

fn video_input(script: &ScriptDraft) -> VideoInput {
    let prompt = std::iter::once(script.hook.as_str())
        .chain(VISUAL_DIRECTION)
        .collect::<Vec<_>>()
        .join(" ");

    VideoInput {
        prompt,
        fps: 24,
        guidance_scale: 3.5,
        duration: 6,
        aspect_ratio: "9:16".to_string(),
        negative_prompt: NEGATIVE_PROMPT.to_string(),
    }
}

/// Resolves the create endpoint for a model identifier.
///
/// `owner/name` uses the model-scoped endpoint; `owner/name:version` posts the
/// version to the generic predictions endpoint.
fn prediction_route(
    base_url: &str,
    model: &str,
) -> Result<(String, Option<String>), AutoshortsError> {
    let invalid =
        || AutoshortsError::Config(format!("invalid replicate model identifier: {model}"));

    let (name, version) = match model.split_once(':') {
        Some((name, version)) if !version.is_empty() => (name, Some(version.to_string())),
        Some(_) => return Err(invalid()),
        None => (model, None),
    };
    let (owner, model_name) = name.split_once('/').ok_or_else(invalid)?;
    if owner.is_empty() || model_name.is_empty() || model_name.contains('/') {
        return Err(invalid());
    }

    Ok(match version {
        Some(version) => (format!("{base_url}/predictions"), Some(version)),
        None => (
            format!("{base_url}/models/{owner}/{model_name}/predictions"),
            None,
        ),
    })
}

async fn send_prediction(request: reqwest::RequestBuilder) -> Result<Prediction, AutoshortsError> {
    let response = request.send().await.map_err(|e| AutoshortsError::Provider {
        message: format!("Replicate request failed: {e}"),
        source: Some(Box::new(e)),
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| AutoshortsError::Provider {
        message: format!("failed to read Replicate response: {e}"),
        source: Some(Box::new(e)),
    })?;
    if !status.is_success() {
        return Err(AutoshortsError::provider(format!(
            "Replicate returned {status}: {body}"
        )));
    }

    serde_json::from_str(&body).map_err(|e| AutoshortsError::Provider {
        message: format!("failed to parse Replicate prediction: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Picks the video URL out of a model's output.
///
/// Strings are used as-is, arrays yield their last string, and objects yield
/// the last entry of `output` or `urls`, falling back to `video`.
pub fn extract_video_url(output: &Value) -> Option<String> {
    fn last_string(items: &[Value]) -> Option<String> {
        items.last().and_then(Value::as_str).map(String::from)
    }

    let url = match output {
        Value::String(url) => Some(url.clone()),
        Value::Array(items) => last_string(items),
        Value::Object(map) => map
            .get("output")
            .or_else(|| map.get("urls"))
            .and_then(Value::as_array)
            .and_then(|items| last_string(items))
            .or_else(|| map.get("video").and_then(Value::as_str).map(String::from)),
        _ => None,
    };
    url.filter(|u| !u.is_empty())
}
