// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the autoshorts pipeline.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Top-level autoshorts configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AutoshortsConfig {
    /// Pipeline behavior settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Google Trends topic discovery settings.
    #[serde(default)]
    pub trends: TrendsConfig,

    /// OpenAI script drafting settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Replicate video synthesis settings.
    #[serde(default)]
    pub replicate: ReplicateConfig,

    /// YouTube publishing settings.
    #[serde(default)]
    pub youtube: YoutubeConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Pipeline behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Region used for topic discovery when a run does not name one.
    #[serde(default = "default_region")]
    pub default_region: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            default_region: default_region(),
            log_level: default_log_level(),
        }
    }
}

fn default_region() -> String {
    autoshorts_core::DEFAULT_REGION.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Google Trends configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TrendsConfig {
    /// Daily trends endpoint.
    #[serde(default = "default_trends_url")]
    pub base_url: String,

    /// Interface language passed as `hl`.
    #[serde(default = "default_hl")]
    pub hl: String,

    /// User-Agent sent with feed requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum number of candidates returned per lookup.
    #[serde(default = "default_max_topics")]
    pub max_topics: usize,
}

impl Default for TrendsConfig {
    fn default() -> Self {
        Self {
            base_url: default_trends_url(),
            hl: default_hl(),
            user_agent: default_user_agent(),
            max_topics: default_max_topics(),
        }
    }
}

fn default_trends_url() -> String {
    "https://trends.google.com/trends/api/dailytrends".to_string()
}

fn default_hl() -> String {
    "en-US".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/123.0.0.0 Safari/537.36"
        .to_string()
}

fn default_max_topics() -> usize {
    20
}

/// OpenAI configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// OpenAI API key. `None` falls back to the `OPENAI_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Chat model used for script drafting.
    #[serde(default = "default_openai_model")]
    pub model: String,

    /// API base URL (without the `/chat/completions` suffix).
    #[serde(default = "default_openai_url")]
    pub base_url: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_openai_model(),
            base_url: default_openai_url(),
        }
    }
}

impl OpenAiConfig {
    /// The configured key, else `OPENAI_API_KEY`.
    pub fn resolved_api_key(&self) -> Option<String> {
        resolve_secret(self.api_key.as_deref(), "OPENAI_API_KEY")
    }
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_openai_url() -> String {
    "https://api.openai.com/v1".to_string()
}

/// Replicate configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReplicateConfig {
    /// Replicate API token. `None` falls back to `REPLICATE_API_TOKEN`.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Model identifier, `owner/name` or `owner/name:version`.
    #[serde(default = "default_replicate_model")]
    pub model: String,

    /// API base URL.
    #[serde(default = "default_replicate_url")]
    pub base_url: String,

    /// Seconds between prediction status polls.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Upper bound on how long a prediction may take.
    #[serde(default = "default_max_wait_secs")]
    pub max_wait_secs: u64,
}

impl Default for ReplicateConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            model: default_replicate_model(),
            base_url: default_replicate_url(),
            poll_interval_secs: default_poll_interval_secs(),
            max_wait_secs: default_max_wait_secs(),
        }
    }
}

impl ReplicateConfig {
    /// The configured token, else `REPLICATE_API_TOKEN`.
    pub fn resolved_api_token(&self) -> Option<String> {
        resolve_secret(self.api_token.as_deref(), "REPLICATE_API_TOKEN")
    }
}

fn default_replicate_model() -> String {
    "black-forest-labs/flux-video".to_string()
}

fn default_replicate_url() -> String {
    "https://api.replicate.com/v1".to_string()
}

fn default_poll_interval_secs() -> u64 {
    2
}

fn default_max_wait_secs() -> u64 {
    600
}

/// Visibility of a published video.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PrivacyStatus {
    #[default]
    Public,
    Private,
    Unlisted,
}

/// YouTube publishing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct YoutubeConfig {
    /// OAuth client id. `None` falls back to `YOUTUBE_CLIENT_ID`.
    #[serde(default)]
    pub client_id: Option<String>,

    /// OAuth client secret. `None` falls back to `YOUTUBE_CLIENT_SECRET`.
    #[serde(default)]
    pub client_secret: Option<String>,

    /// Long-lived refresh token. `None` falls back to `YOUTUBE_REFRESH_TOKEN`.
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Channel the uploads land on (informational).
    #[serde(default)]
    pub channel_id: Option<String>,

    /// Video category id ("24" is Entertainment).
    #[serde(default = "default_category_id")]
    pub category_id: String,

    /// Visibility of uploaded videos.
    #[serde(default)]
    pub privacy_status: PrivacyStatus,

    /// Comma-separated tags appended to every upload.
    #[serde(default)]
    pub default_tags: Option<String>,

    /// OAuth token endpoint.
    #[serde(default = "default_token_url")]
    pub token_url: String,

    /// Resumable upload endpoint.
    #[serde(default = "default_upload_url")]
    pub upload_url: String,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            refresh_token: None,
            channel_id: None,
            category_id: default_category_id(),
            privacy_status: PrivacyStatus::default(),
            default_tags: None,
            token_url: default_token_url(),
            upload_url: default_upload_url(),
        }
    }
}

impl YoutubeConfig {
    /// The configured default tags, trimmed, with blanks removed.
    pub fn default_tag_list(&self) -> Vec<String> {
        self.default_tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn resolved_client_id(&self) -> Option<String> {
        resolve_secret(self.client_id.as_deref(), "YOUTUBE_CLIENT_ID")
    }

    pub fn resolved_client_secret(&self) -> Option<String> {
        resolve_secret(self.client_secret.as_deref(), "YOUTUBE_CLIENT_SECRET")
    }

    pub fn resolved_refresh_token(&self) -> Option<String> {
        resolve_secret(self.refresh_token.as_deref(), "YOUTUBE_REFRESH_TOKEN")
    }

    /// `base` merged with the configured default tags.
    pub fn tags_with(&self, base: &[String]) -> Vec<String> {
        autoshorts_core::merge_tags(base, self.default_tag_list())
    }
}

fn default_category_id() -> String {
    "24".to_string()
}

fn default_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_upload_url() -> String {
    "https://www.googleapis.com/upload/youtube/v3/videos".to_string()
}

/// A non-blank configured secret, else the non-blank value of `env_var`.
pub fn resolve_secret(configured: Option<&str>, env_var: &str) -> Option<String> {
    configured
        .map(str::to_string)
        .or_else(|| std::env::var(env_var).ok())
        .filter(|value| !value.trim().is_empty())
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = AutoshortsConfig::default();
        assert_eq!(config.pipeline.default_region, "US");
        assert_eq!(config.openai.model, "gpt-4o-mini");
        assert_eq!(config.replicate.model, "black-forest-labs/flux-video");
        assert_eq!(config.youtube.category_id, "24");
        assert_eq!(config.youtube.privacy_status, PrivacyStatus::Public);
        assert_eq!(config.trends.max_topics, 20);
        assert_eq!(config.gateway.port, 3000);
    }

    #[test]
    fn default_tags_are_split_and_trimmed() {
        let youtube = YoutubeConfig {
            default_tags: Some(" #shorts, ,#daily ".into()),
            ..YoutubeConfig::default()
        };
        assert_eq!(youtube.default_tag_list(), vec!["#shorts", "#daily"]);
        assert_eq!(
            youtube.tags_with(&["#daily".to_string(), "#news".to_string()]),
            vec!["#daily", "#news", "#shorts"]
        );
    }

    #[test]
    fn configured_secret_wins() {
        assert_eq!(
            resolve_secret(Some("sk-test"), "AUTOSHORTS_TEST_UNSET_SECRET"),
            Some("sk-test".to_string())
        );
        assert_eq!(resolve_secret(Some("  "), "AUTOSHORTS_TEST_UNSET_SECRET"), None);
        assert_eq!(resolve_secret(None, "AUTOSHORTS_TEST_UNSET_SECRET"), None);
    }

    #[test]
    fn no_default_tags_keeps_base() {
        let youtube = YoutubeConfig::default();
        assert_eq!(youtube.tags_with(&["#a".to_string()]), vec!["#a"]);
    }
}
