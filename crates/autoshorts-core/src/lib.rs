// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the autoshorts pipeline.
//!
//! Defines the run record and its log model, the stage payloads, the shared
//! error type, and the collaborator traits implemented by the topic, script,
//! video, and publish adapters.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{AutoshortsError, UNKNOWN_FAILURE};
pub use types::{
    LogEntry, LogLevel, Run, RunId, RunOptions, RunPatch, RunPhase, ScriptDraft, Stage,
    TrendIdea, UploadResult, UploadStatus, VideoAsset, DEFAULT_REGION,
};

pub use traits::{Publisher, ScriptDrafter, StageAdapter, TopicSource, VideoSynthesizer};

/// Merges `base` tags with extra default tags.
///
/// Order is preserved, duplicates and blank entries are dropped.
pub fn merge_tags<I, S>(base: &[String], extra: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut merged: Vec<String> = Vec::with_capacity(base.len());
    let candidates = base
        .iter()
        .map(|t| t.trim().to_string())
        .chain(extra.into_iter().map(|t| t.as_ref().trim().to_string()));
    for tag in candidates {
        if !tag.is_empty() && !merged.contains(&tag) {
            merged.push(tag);
        }
    }
    merged
}
