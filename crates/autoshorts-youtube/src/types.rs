// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for Google OAuth and the YouTube Data API.

use serde::{Deserialize, Serialize};

/// Response from the OAuth token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Metadata sent when starting an upload session.
#[derive(Debug, Clone, Serialize)]
pub struct VideoResource {
    pub snippet: Snippet,
    pub status: VideoStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatus {
    pub privacy_status: String,
    pub self_declared_made_for_kids: bool,
}

/// The video resource returned once the bytes are uploaded.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedVideo {
    #[serde(default)]
    pub id: Option<String>,
}

/// Google API error envelope. OAuth errors use a flat shape instead.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GoogleError {
    Api { error: GoogleErrorDetail },
    OAuth {
        error: String,
        #[serde(default)]
        error_description: Option<String>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleErrorDetail {
    pub message: String,
}

impl GoogleError {
    pub fn message(self) -> String {
        match self {
            Self::Api { error } => error.message,
            Self::OAuth {
                error,
                error_description,
            } => error_description.unwrap_or(error),
        }
    }
}
