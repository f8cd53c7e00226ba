// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Publishing to a video platform.

use async_trait::async_trait;

use crate::error::AutoshortsError;
use crate::traits::adapter::StageAdapter;
use crate::types::{ScriptDraft, UploadResult, VideoAsset};

/// Publishes a finished asset.
///
/// Transport and API failures are reported as an [`UploadResult`] with
/// status `failed`, not as `Err`. `Err` is reserved for faults the
/// publisher cannot describe as an outcome, such as missing credentials.
#[async_trait]
pub trait Publisher: StageAdapter {
    async fn publish(
        &self,
        script: &ScriptDraft,
        video: &VideoAsset,
    ) -> Result<UploadResult, AutoshortsError>;
}
