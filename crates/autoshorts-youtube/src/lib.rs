// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! YouTube publisher for the autoshorts pipeline.
//!
//! Refreshes an OAuth access token, downloads the synthesized asset, and
//! uploads it through the resumable upload protocol. Only missing credentials
//! are returned as errors; every other failure becomes a `failed` outcome.

pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use autoshorts_config::model::YoutubeConfig;
use autoshorts_core::error::AutoshortsError;
use autoshorts_core::traits::{Publisher, StageAdapter};
use autoshorts_core::types::{ScriptDraft, Stage, UploadResult, VideoAsset};
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, LOCATION};
use tracing::{debug, info, warn};

use crate::types::{
    GoogleError, Snippet, TokenResponse, UploadedVideo, VideoResource, VideoStatus,
};

const DEFAULT_MIME_TYPE: &str = "video/mp4";
const WATCH_URL: &str = "https://youtube.com/watch?v=";

struct Credentials {
    client_id: String,
    client_secret: String,
    refresh_token: String,
}

/// Publisher backed by the YouTube Data API.
#[derive(Debug, Clone)]
pub struct YoutubePublisher {
    client: reqwest::Client,
    config: YoutubeConfig,
}

impl YoutubePublisher {
    pub fn new(config: &YoutubeConfig) -> Result<Self, AutoshortsError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(600))
            .build()
            .map_err(|e| AutoshortsError::Publish {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn credentials(&self) -> Result<Credentials, AutoshortsError> {
        let client_id = self.config.resolved_client_id();
        let client_secret = self.config.resolved_client_secret();
        let refresh_token = self.config.resolved_refresh_token();

        match (client_id, client_secret, refresh_token) {
            (Some(client_id), Some(client_secret), Some(refresh_token)) => Ok(Credentials {
                client_id,
                client_secret,
                refresh_token,
            }),
            (client_id, client_secret, refresh_token) => {
                let missing: Vec<&str> = [
                    ("youtube.client_id", client_id.is_none()),
                    ("youtube.client_secret", client_secret.is_none()),
                    ("youtube.refresh_token", refresh_token.is_none()),
                ]
                .into_iter()
                .filter_map(|(key, absent)| absent.then_some(key))
                .collect();
                Err(AutoshortsError::Config(format!(
                    "Missing required configuration: {}",
                    missing.join(", ")
                )))
            }
        }
    }

    async fn access_token(&self, credentials: &Credentials) -> Result<String, AutoshortsError> {
        let response = self
            .client
            .post(&self.config.token_url)
            .form(&[
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
                ("refresh_token", credentials.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| publish_error("OAuth token request failed", e))?;

        let token: TokenResponse = read_json(response, "OAuth token exchange").await?;
        Ok(token.access_token)
    }

    async fn download(&self, video_url: &str) -> Result<(Vec<u8>, String), AutoshortsError> {
        let response = self
            .client
            .get(video_url)
            .send()
            .await
            .map_err(|e| publish_error("video download failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AutoshortsError::publish(format!(
                "Unable to download generated video (status: {}).",
                status.as_u16()
            )));
        }

        let mime_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_MIME_TYPE)
            .to_string();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| publish_error("video download failed", e))?;

        debug!(size = bytes.len(), mime_type = %mime_type, "video downloaded");
        Ok((bytes.to_vec(), mime_type))
    }

    fn video_resource(&self, script: &ScriptDraft) -> VideoResource {
        VideoResource {
            snippet: Snippet {
                title: script.title.clone(),
                description: format!(
                    "{}\n\n{}\n\nScript:\n{}",
                    script.hook, script.description, script.script
                ),
                tags: self.config.tags_with(&script.hashtags),
                category_id: self.config.category_id.clone(),
            },
            status: VideoStatus {
                privacy_status: self.config.privacy_status.to_string(),
                self_declared_made_for_kids: false,
            },
        }
    }

    /// Starts a resumable session and returns its upload URL.
    async fn start_session(
        &self,
        access_token: &str,
        resource: &VideoResource,
        mime_type: &str,
        size: usize,
    ) -> Result<String, AutoshortsError> {
        let response = self
            .client
            .post(&self.config.upload_url)
            .query(&[("uploadType", "resumable"), ("part", "snippet,status")])
            .bearer_auth(access_token)
            .header("X-Upload-Content-Type", mime_type)
            .header("X-Upload-Content-Length", size.to_string())
            .json(resource)
            .send()
            .await
            .map_err(|e| publish_error("YouTube upload session request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AutoshortsError::publish(google_error_message(status, &body)));
        }

        response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(String::from)
            .ok_or_else(|| {
                AutoshortsError::publish("YouTube did not return a resumable upload URL.")
            })
    }

    async fn try_publish(
        &self,
        credentials: Credentials,
        script: &ScriptDraft,
        video: &VideoAsset,
    ) -> Result<UploadResult, AutoshortsError> {
        let access_token = self.access_token(&credentials).await?;
        let (bytes, mime_type) = self.download(&video.video_url).await?;

        let resource = self.video_resource(script);
        let session_url = self
            .start_session(&access_token, &resource, &mime_type, bytes.len())
            .await?;

        let response = self
            .client
            .put(session_url)
            .bearer_auth(&access_token)
            .header(CONTENT_TYPE, mime_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| publish_error("YouTube upload failed", e))?;

        let uploaded: UploadedVideo = read_json(response, "YouTube upload").await?;
        let video_id = uploaded.id.filter(|id| !id.is_empty()).ok_or_else(|| {
            AutoshortsError::publish("YouTube upload succeeded without returning a video ID.")
        })?;

        info!(video_id = %video_id, "video uploaded to YouTube");
        Ok(UploadResult::success(
            video_id.clone(),
            format!("{WATCH_URL}{video_id}"),
        ))
    }
}

impl StageAdapter for YoutubePublisher {
    fn name(&self) -> &str {
        "youtube"
    }

    fn stage(&self) -> Stage {
        Stage::Publish
    }
}

#[async_trait]
impl Publisher for YoutubePublisher {
    async fn publish(
        &self,
        script: &ScriptDraft,
        video: &VideoAsset,
    ) -> Result<UploadResult, AutoshortsError> {
        let credentials = self.credentials()?;

        match self.try_publish(credentials, script, video).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                warn!(error = %err, "YouTube publish failed");
                Ok(UploadResult::failed(err.summary()))
            }
        }
    }
}

fn publish_error(context: &str, err: reqwest::Error) -> AutoshortsError {
    AutoshortsError::Publish {
        message: format!("{context}: {err}"),
        source: Some(Box::new(err)),
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    what: &str,
) -> Result<T, AutoshortsError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| publish_error(&format!("failed to read {what} response"), e))?;

    if !status.is_success() {
        return Err(AutoshortsError::publish(google_error_message(status, &body)));
    }

    serde_json::from_str(&body).map_err(|e| AutoshortsError::Publish {
        message: format!("failed to parse {what} response: {e}"),
        source: Some(Box::new(e)),
    })
}

fn google_error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<GoogleError>(body)
        .map(GoogleError::message)
        .unwrap_or_else(|_| format!("YouTube returned {status}: {body}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoshorts_config::model::PrivacyStatus;
    use autoshorts_core::types::UploadStatus;
    use serde_json::json;
    use wiremock::matchers::{
        body_partial_json, body_string_contains, header, method, path, query_param,
    };
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn script() -> ScriptDraft {
        ScriptDraft {
            title: "Eclipse".into(),
            description: "Watch now.".into(),
            hook: "Stop scrolling.".into(),
            script: "1. Sun".into(),
            hashtags: vec!["#eclipse".into()],
        }
    }

    fn config(server: &MockServer) -> YoutubeConfig {
        YoutubeConfig {
            client_id: Some("client".into()),
            client_secret: Some("secret".into()),
            refresh_token: Some("refresh".into()),
            default_tags: Some("#shorts".into()),
            privacy_status: PrivacyStatus::Unlisted,
            token_url: format!("{}/token", server.uri()),
            upload_url: format!("{}/upload/youtube/v3/videos", server.uri()),
            ..YoutubeConfig::default()
        }
    }

    fn asset(server: &MockServer) -> VideoAsset {
        VideoAsset {
            video_url: format!("{}/out.mp4", server.uri()),
            preview_image: None,
            provider: "owner/video".into(),
            raw: None,
        }
    }

    async fn mount_token(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "ya29.token",
                "expires_in": 3599,
                "token_type": "Bearer"
            })))
            .mount(server)
            .await;
    }

    async fn mount_download(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/out.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0_u8; 16]))
            .mount(server)
            .await;
    }

    #[test]
    fn resource_combines_script_fields() {
        let publisher = YoutubePublisher::new(&YoutubeConfig {
            default_tags: Some("#shorts, #eclipse".into()),
            ..YoutubeConfig::default()
        })
        .unwrap();
        let resource = publisher.video_resource(&script());
        assert_eq!(
            resource.snippet.description,
            "Stop scrolling.\n\nWatch now.\n\nScript:\n1. Sun"
        );
        assert_eq!(resource.snippet.tags, vec!["#eclipse", "#shorts"]);
        assert_eq!(resource.snippet.category_id, "24");
        assert_eq!(resource.status.privacy_status, "public");
        assert!(!resource.status.self_declared_made_for_kids);
    }

    #[tokio::test]
    async fn publishes_through_resumable_session() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        mount_download(&server).await;

        Mock::given(method("POST"))
            .and(path("/upload/youtube/v3/videos"))
            .and(query_param("uploadType", "resumable"))
            .and(header("authorization", "Bearer ya29.token"))
            .and(body_partial_json(json!({
                "snippet": { "title": "Eclipse", "tags": ["#eclipse", "#shorts"] },
                "status": { "privacyStatus": "unlisted", "selfDeclaredMadeForKids": false }
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("location", format!("{}/session/abc", server.uri()).as_str()),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/session/abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "vid123" })))
            .expect(1)
            .mount(&server)
            .await;

        let publisher = YoutubePublisher::new(&config(&server)).unwrap();
        let outcome = publisher.publish(&script(), &asset(&server)).await.unwrap();
        assert_eq!(outcome.status, UploadStatus::Success);
        assert_eq!(outcome.video_id.as_deref(), Some("vid123"));
        assert_eq!(
            outcome.youtube_url.as_deref(),
            Some("https://youtube.com/watch?v=vid123")
        );
    }

    #[tokio::test]
    async fn api_failure_becomes_failed_outcome() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        mount_download(&server).await;
        Mock::given(method("POST"))
            .and(path("/upload/youtube/v3/videos"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": { "code": 403, "message": "quota exceeded" }
            })))
            .mount(&server)
            .await;

        let publisher = YoutubePublisher::new(&config(&server)).unwrap();
        let outcome = publisher.publish(&script(), &asset(&server)).await.unwrap();
        assert_eq!(outcome.status, UploadStatus::Failed);
        assert_eq!(outcome.message.as_deref(), Some("quota exceeded"));
    }

    #[tokio::test]
    async fn download_failure_becomes_failed_outcome() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("GET"))
            .and(path("/out.mp4"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let publisher = YoutubePublisher::new(&config(&server)).unwrap();
        let outcome = publisher.publish(&script(), &asset(&server)).await.unwrap();
        assert_eq!(outcome.status, UploadStatus::Failed);
        assert_eq!(
            outcome.message.as_deref(),
            Some("Unable to download generated video (status: 404).")
        );
    }

    #[tokio::test]
    async fn rejected_refresh_token_becomes_failed_outcome() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "Token has been expired or revoked."
            })))
            .mount(&server)
            .await;

        let publisher = YoutubePublisher::new(&config(&server)).unwrap();
        let outcome = publisher.publish(&script(), &asset(&server)).await.unwrap();
        assert_eq!(outcome.status, UploadStatus::Failed);
        assert_eq!(
            outcome.message.as_deref(),
            Some("Token has been expired or revoked.")
        );
    }

    #[tokio::test]
    async fn missing_video_id_becomes_failed_outcome() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        mount_download(&server).await;
        Mock::given(method("POST"))
            .and(path("/upload/youtube/v3/videos"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("location", format!("{}/session/xyz", server.uri()).as_str()),
            )
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/session/xyz"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "kind": "youtube#video" })),
            )
            .mount(&server)
            .await;

        let publisher = YoutubePublisher::new(&config(&server)).unwrap();
        let outcome = publisher.publish(&script(), &asset(&server)).await.unwrap();
        assert_eq!(outcome.status, UploadStatus::Failed);
        assert_eq!(
            outcome.message.as_deref(),
            Some("YouTube upload succeeded without returning a video ID.")
        );
    }

    #[test]
    fn missing_credentials_are_listed() {
        let publisher = YoutubePublisher::new(&YoutubeConfig {
            client_id: Some("client".into()),
            ..YoutubeConfig::default()
        })
        .unwrap();

        // Only meaningful when the fallback variables are unset.
        if std::env::var("YOUTUBE_CLIENT_SECRET").is_err()
            && std::env::var("YOUTUBE_REFRESH_TOKEN").is_err()
        {
            let err = publisher.credentials().err().unwrap();
            assert_eq!(
                err.summary(),
                "Missing required configuration: youtube.client_secret, youtube.refresh_token"
            );
        }
    }
}
