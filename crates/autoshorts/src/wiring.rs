// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assembles the production pipeline from configuration.

use std::sync::Arc;

use autoshorts_config::AutoshortsConfig;
use autoshorts_core::AutoshortsError;
use autoshorts_openai::OpenAiScriptDrafter;
use autoshorts_pipeline::Pipeline;
use autoshorts_replicate::ReplicateVideoSynthesizer;
use autoshorts_trends::GoogleTrendsSource;
use autoshorts_youtube::YoutubePublisher;

/// Builds a pipeline over Google Trends, OpenAI, Replicate, and YouTube.
///
/// Missing credentials do not fail here; they surface as run errors when the
/// stage that needs them executes.
pub fn build_pipeline(config: &AutoshortsConfig) -> Result<Pipeline, AutoshortsError> {
    Pipeline::builder()
        .topic_source(Arc::new(GoogleTrendsSource::new(&config.trends)?))
        .script_drafter(Arc::new(OpenAiScriptDrafter::new(
            &config.openai,
            &config.youtube,
        )?))
        .video_synthesizer(Arc::new(ReplicateVideoSynthesizer::new(&config.replicate)?))
        .publisher(Arc::new(YoutubePublisher::new(&config.youtube)?))
        .default_region(config.pipeline.default_region.clone())
        .build()
}
