// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Video synthesis.

use async_trait::async_trait;

use crate::error::AutoshortsError;
use crate::traits::adapter::StageAdapter;
use crate::types::{ScriptDraft, TrendIdea, VideoAsset};

/// Produces a playable video asset from a topic and its script.
#[async_trait]
pub trait VideoSynthesizer: StageAdapter {
    /// Fails if no asset locator can be produced.
    async fn synthesize(
        &self,
        topic: &TrendIdea,
        script: &ScriptDraft,
    ) -> Result<VideoAsset, AutoshortsError>;
}
