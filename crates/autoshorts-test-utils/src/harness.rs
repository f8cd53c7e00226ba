// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end pipeline testing.
//!
//! `PipelineHarness` wires a [`Pipeline`] to mock collaborators and keeps
//! handles to each mock so tests can assert on call counts afterwards.

use std::sync::Arc;

use autoshorts_core::types::{Run, RunOptions, TrendIdea};
use autoshorts_core::AutoshortsError;
use autoshorts_pipeline::{Pipeline, RunStore};

use crate::mock_stages::{
    sample_idea, MockPublisher, MockScriptDrafter, MockTopicSource, MockVideoSynthesizer,
};

/// Builder for [`PipelineHarness`].
pub struct PipelineHarnessBuilder {
    topics: MockTopicSource,
    drafter: MockScriptDrafter,
    synthesizer: MockVideoSynthesizer,
    publisher: MockPublisher,
    default_region: Option<String>,
}

impl PipelineHarnessBuilder {
    fn new() -> Self {
        Self {
            topics: MockTopicSource::new(vec![
                sample_idea("solar eclipse", 500.0),
                sample_idea("cup final", 200.0),
            ]),
            drafter: MockScriptDrafter::new(),
            synthesizer: MockVideoSynthesizer::new(),
            publisher: MockPublisher::new(),
            default_region: None,
        }
    }

    /// Replace the topic source.
    pub fn with_topic_source(mut self, topics: MockTopicSource) -> Self {
        self.topics = topics;
        self
    }

    /// Shorthand for a topic source returning `topics`.
    pub fn with_topics(self, topics: Vec<TrendIdea>) -> Self {
        self.with_topic_source(MockTopicSource::new(topics))
    }

    pub fn with_drafter(mut self, drafter: MockScriptDrafter) -> Self {
        self.drafter = drafter;
        self
    }

    pub fn with_synthesizer(mut self, synthesizer: MockVideoSynthesizer) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    pub fn with_publisher(mut self, publisher: MockPublisher) -> Self {
        self.publisher = publisher;
        self
    }

    pub fn with_default_region(mut self, region: impl Into<String>) -> Self {
        self.default_region = Some(region.into());
        self
    }

    pub fn build(self) -> Result<PipelineHarness, AutoshortsError> {
        let topics = Arc::new(self.topics);
        let drafter = Arc::new(self.drafter);
        let synthesizer = Arc::new(self.synthesizer);
        let publisher = Arc::new(self.publisher);
        let store = Arc::new(RunStore::new());

        let mut builder = Pipeline::builder()
            .store(Arc::clone(&store))
            .topic_source(topics.clone())
            .script_drafter(drafter.clone())
            .video_synthesizer(synthesizer.clone())
            .publisher(publisher.clone());
        if let Some(region) = self.default_region {
            builder = builder.default_region(region);
        }

        Ok(PipelineHarness {
            pipeline: Arc::new(builder.build()?),
            store,
            topics,
            drafter,
            synthesizer,
            publisher,
        })
    }
}

/// A pipeline over mock collaborators.
pub struct PipelineHarness {
    pub pipeline: Arc<Pipeline>,
    pub store: Arc<RunStore>,
    pub topics: Arc<MockTopicSource>,
    pub drafter: Arc<MockScriptDrafter>,
    pub synthesizer: Arc<MockVideoSynthesizer>,
    pub publisher: Arc<MockPublisher>,
}

impl PipelineHarness {
    pub fn builder() -> PipelineHarnessBuilder {
        PipelineHarnessBuilder::new()
    }

    /// Runs the pipeline once.
    pub async fn run(&self, options: RunOptions) -> Run {
        self.pipeline.run_daily_upload(options).await
    }

    /// Runs the pipeline once with an override keyword.
    pub async fn run_keyword(&self, keyword: &str, dry_run: bool) -> Run {
        self.run(RunOptions {
            override_keyword: Some(keyword.to_string()),
            dry_run,
            ..RunOptions::default()
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_harness_publishes_top_topic() {
        let harness = PipelineHarness::builder().build().unwrap();
        let run = harness.run(RunOptions::default()).await;

        assert!(run.error.is_none(), "unexpected error: {:?}", run.error);
        assert_eq!(run.topic.unwrap().keyword, "solar eclipse");
        assert_eq!(harness.publisher.calls(), 1);
        assert_eq!(harness.store.len(), 1);
    }

    #[test]
    fn pipeline_reports_mock_collaborators_in_stage_order() {
        use autoshorts_core::types::Stage;

        let harness = PipelineHarness::builder().build().unwrap();
        assert_eq!(
            harness.pipeline.collaborators(),
            [
                (Stage::Topic, "mock-topics"),
                (Stage::Script, "mock-drafter"),
                (Stage::Video, "mock-synthesizer"),
                (Stage::Publish, "mock-publisher"),
            ]
        );
    }
}
