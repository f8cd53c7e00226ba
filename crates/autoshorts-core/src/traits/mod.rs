// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stage collaborator traits consumed by the run orchestrator.
//!
//! Every collaborator extends [`StageAdapter`] and uses `#[async_trait]`
//! so it can be held as `Arc<dyn ...>`.

pub mod adapter;
pub mod publisher;
pub mod script;
pub mod topic;
pub mod video;

pub use adapter::StageAdapter;
pub use publisher::Publisher;
pub use script::ScriptDrafter;
pub use topic::TopicSource;
pub use video::VideoSynthesizer;
