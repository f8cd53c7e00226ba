// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for autoshorts integration tests.
//!
//! Provides scriptable stage collaborators and a pipeline harness for fast,
//! deterministic tests without external services.
//!
//! # Components
//!
//! - [`MockTopicSource`], [`MockScriptDrafter`], [`MockVideoSynthesizer`],
//!   [`MockPublisher`] - collaborators that count calls and can fail or panic
//! - [`PipelineHarness`] - a [`Pipeline`](autoshorts_pipeline::Pipeline) wired to the mocks

pub mod harness;
pub mod mock_stages;

pub use harness::{PipelineHarness, PipelineHarnessBuilder};
pub use mock_stages::{
    Fault, MockPublisher, MockScriptDrafter, MockTopicSource, MockVideoSynthesizer, sample_idea,
};
