// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Script drafting.

use async_trait::async_trait;

use crate::error::AutoshortsError;
use crate::traits::adapter::StageAdapter;
use crate::types::{ScriptDraft, TrendIdea};

/// Drafts a short-video script for a topic.
#[async_trait]
pub trait ScriptDrafter: StageAdapter {
    async fn draft(&self, topic: &TrendIdea) -> Result<ScriptDraft, AutoshortsError>;
}
