// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Run record, log entries, and the stage payloads exchanged with collaborators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Region used when a caller does not name one.
pub const DEFAULT_REGION: &str = "US";

/// Unique identifier for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub String);

impl RunId {
    /// Allocates a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RunId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Severity of a run log entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Success,
}

/// One observable event in a run's lifeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    /// Machine-readable context (a score, a status code, a publish outcome).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LogEntry {
    /// Creates an entry stamped with the current time.
    pub fn now(
        level: LogLevel,
        message: impl Into<String>,
        details: Option<serde_json::Value>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            details,
        }
    }
}

/// A candidate topic returned by topic discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendIdea {
    pub keyword: String,
    /// Higher means more trending.
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// A drafted short-video script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptDraft {
    pub title: String,
    pub description: String,
    pub hook: String,
    pub script: String,
    pub hashtags: Vec<String>,
}

/// A synthesized, playable video asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoAsset {
    pub video_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<String>,
    pub provider: String,
    /// Raw provider output, kept for inspection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

/// Outcome status of the publish stage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UploadStatus {
    Success,
    Skipped,
    Failed,
}

/// Result of the publish stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub status: UploadStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
}

impl UploadResult {
    pub fn success(video_id: impl Into<String>, youtube_url: impl Into<String>) -> Self {
        Self {
            status: UploadStatus::Success,
            message: None,
            video_id: Some(video_id.into()),
            youtube_url: Some(youtube_url.into()),
        }
    }

    pub fn skipped(message: impl Into<String>) -> Self {
        Self {
            status: UploadStatus::Skipped,
            message: Some(message.into()),
            video_id: None,
            youtube_url: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: UploadStatus::Failed,
            message: Some(message.into()),
            video_id: None,
            youtube_url: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == UploadStatus::Success
    }
}

/// The pipeline stage a collaborator serves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    Topic,
    Script,
    Video,
    Publish,
}

/// Where a run currently sits in its lifecycle.
///
/// `Created -> TopicSelected -> Scripted -> VideoReady -> {Published | PublishFailed | PublishSkipped}`,
/// with `Failed` reachable from any phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RunPhase {
    Created,
    TopicSelected,
    Scripted,
    VideoReady,
    Published,
    PublishFailed,
    PublishSkipped,
    Failed,
}

/// The unit of work and of observability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub id: RunId,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<TrendIdea>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<ScriptDraft>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoAsset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload: Option<UploadResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Chronological, append-only.
    pub logs: Vec<LogEntry>,
}

impl Run {
    /// A run with no progress beyond its identity and start time.
    pub fn new(id: RunId, started_at: DateTime<Utc>) -> Self {
        Self {
            id,
            started_at,
            completed_at: None,
            topic: None,
            script: None,
            video: None,
            upload: None,
            error: None,
            logs: Vec::new(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Derives the lifecycle phase from the populated fields.
    pub fn phase(&self) -> RunPhase {
        if self.error.is_some() {
            return RunPhase::Failed;
        }
        if let Some(upload) = &self.upload {
            return match upload.status {
                UploadStatus::Success => RunPhase::Published,
                UploadStatus::Failed => RunPhase::PublishFailed,
                UploadStatus::Skipped => RunPhase::PublishSkipped,
            };
        }
        if self.video.is_some() {
            RunPhase::VideoReady
        } else if self.script.is_some() {
            RunPhase::Scripted
        } else if self.topic.is_some() {
            RunPhase::TopicSelected
        } else {
            RunPhase::Created
        }
    }

    /// The most recent log entry, if any.
    pub fn last_log(&self) -> Option<&LogEntry> {
        self.logs.last()
    }
}

/// The final fields merged into a run when it completes. `None` fields leave
/// the run untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunPatch {
    pub upload: Option<UploadResult>,
    pub error: Option<String>,
}

impl RunPatch {
    pub fn upload(upload: UploadResult) -> Self {
        Self {
            upload: Some(upload),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            upload: None,
            error: Some(message.into()),
        }
    }

    /// Merges the set fields into `run`.
    pub fn apply_to(self, run: &mut Run) {
        if let Some(upload) = self.upload {
            run.upload = Some(upload);
        }
        if let Some(error) = self.error {
            run.error = Some(error);
        }
    }
}

/// Caller-supplied options for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Region code for topic discovery. `None` uses the pipeline default.
    #[serde(default)]
    pub region: Option<String>,
    /// Bypasses topic discovery when set.
    #[serde(default)]
    pub override_keyword: Option<String>,
    /// Skips the publish stage.
    #[serde(default)]
    pub dry_run: bool,
}

impl RunOptions {
    /// The override keyword, trimmed, or `None` when absent or blank.
    pub fn keyword(&self) -> Option<&str> {
        self.override_keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// The requested region, trimmed, falling back to `default`.
    pub fn region_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.region
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample_run() -> Run {
        Run::new(RunId::from("run-1"), Utc::now())
    }

    #[test]
    fn log_level_serializes_lowercase() {
        let json = serde_json::to_string(&LogLevel::Success).unwrap();
        assert_eq!(json, "\"success\"");
        assert_eq!(LogLevel::from_str("warn").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::Error.to_string(), "error");
    }

    #[test]
    fn phase_follows_populated_fields() {
        let mut run = sample_run();
        assert_eq!(run.phase(), RunPhase::Created);

        run.topic = Some(TrendIdea {
            keyword: "rust".into(),
            score: 10.0,
            description: None,
            region: None,
        });
        assert_eq!(run.phase(), RunPhase::TopicSelected);

        run.upload = Some(UploadResult::skipped("dry run"));
        assert_eq!(run.phase(), RunPhase::PublishSkipped);

        run.error = Some("boom".into());
        assert_eq!(run.phase(), RunPhase::Failed);
    }

    #[test]
    fn patch_only_touches_set_fields() {
        let mut run = sample_run();
        run.error = Some("kept".into());
        RunPatch::upload(UploadResult::failed("quota exceeded")).apply_to(&mut run);

        assert_eq!(run.error.as_deref(), Some("kept"));
        assert_eq!(run.upload.unwrap().status, UploadStatus::Failed);
    }

    #[test]
    fn error_patch_leaves_stage_outputs_alone() {
        let mut run = sample_run();
        run.script = Some(ScriptDraft {
            title: "t".into(),
            description: "d".into(),
            hook: "h".into(),
            script: "s".into(),
            hashtags: Vec::new(),
        });
        let before = run.clone();
        RunPatch::error("rate limited").apply_to(&mut run);

        assert_eq!(run.error.as_deref(), Some("rate limited"));
        assert_eq!(run.script, before.script);
        assert!(run.upload.is_none());
    }

    #[test]
    fn absent_fields_are_omitted_from_json() {
        let json = serde_json::to_value(sample_run()).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("id"));
        assert!(obj.contains_key("logs"));
        assert!(!obj.contains_key("completed_at"));
        assert!(!obj.contains_key("error"));
    }

    #[test]
    fn blank_keyword_is_treated_as_absent() {
        let options = RunOptions {
            override_keyword: Some("   ".into()),
            ..RunOptions::default()
        };
        assert_eq!(options.keyword(), None);

        let options = RunOptions {
            override_keyword: Some(" cats ".into()),
            region: Some("".into()),
            dry_run: false,
        };
        assert_eq!(options.keyword(), Some("cats"));
        assert_eq!(options.region_or(DEFAULT_REGION), "US");
    }
}
