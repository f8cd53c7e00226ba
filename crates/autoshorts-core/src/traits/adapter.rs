// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait shared by all stage collaborators.

use crate::types::Stage;

/// Identity shared by every stage collaborator.
pub trait StageAdapter: Send + Sync + 'static {
    /// Human-readable name of this collaborator (e.g. "google-trends").
    fn name(&self) -> &str;

    /// The pipeline stage this collaborator serves.
    fn stage(&self) -> Stage;
}
