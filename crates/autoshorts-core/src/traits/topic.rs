// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Topic discovery.

use async_trait::async_trait;

use crate::error::AutoshortsError;
use crate::traits::adapter::StageAdapter;
use crate::types::TrendIdea;

/// Returns ranked candidate topics for a region.
#[async_trait]
pub trait TopicSource: StageAdapter {
    /// Fetches candidates for `region`.
    ///
    /// An empty vector means "no results" and is not an error; `Err` is
    /// reserved for transport or parse failures.
    async fn discover(&self, region: &str) -> Result<Vec<TrendIdea>, AutoshortsError>;
}
