// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the Replicate predictions API.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Body of a prediction create request.
///
/// `version` is only sent when the model identifier pins one; unpinned models
/// are addressed through the model-scoped endpoint instead.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePrediction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub input: VideoInput,
}

/// Generation parameters sent to the video model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoInput {
    pub prompt: String,
    pub fps: u32,
    pub guidance_scale: f64,
    pub duration: u32,
    pub aspect_ratio: String,
    pub negative_prompt: String,
}

/// Lifecycle state of a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
}

impl PredictionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Canceled)
    }
}

/// A prediction as returned by create and get calls.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    pub id: String,
    pub status: PredictionStatus,
    #[serde(default)]
    pub output: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    #[serde(default)]
    pub urls: Option<PredictionUrls>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionUrls {
    #[serde(default)]
    pub get: Option<String>,
}
