// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Run orchestration engine for the autoshorts pipeline.
//!
//! - [`RunStore`]: in-memory registry of run records with a single
//!   read-modify-write mutation primitive.
//! - [`Pipeline`]: sequences the topic, script, video, and publish stages
//!   into one tracked run and converts any failure into a terminal record.

pub mod orchestrator;
pub mod store;

pub use orchestrator::{select_topic, Pipeline, PipelineBuilder};
pub use store::RunStore;
