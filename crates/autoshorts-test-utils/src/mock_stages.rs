// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock stage collaborators for deterministic testing.
//!
//! Each mock counts its invocations and can be scripted to return an error,
//! panic, or sleep before answering.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use autoshorts_core::traits::{
    Publisher, ScriptDrafter, StageAdapter, TopicSource, VideoSynthesizer,
};
use autoshorts_core::types::{ScriptDraft, Stage, TrendIdea, UploadResult, VideoAsset};
use autoshorts_core::AutoshortsError;

/// A scripted failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// Return an error carrying this message.
    Error(String),
    /// Panic with this message.
    Panic(String),
}

impl Fault {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    pub fn panic(message: impl Into<String>) -> Self {
        Self::Panic(message.into())
    }
}

/// Call counting, optional delay, and optional fault shared by every mock.
#[derive(Debug, Default)]
struct Behavior {
    calls: AtomicUsize,
    fault: Option<Fault>,
    delay: Option<Duration>,
}

impl Behavior {
    async fn enter(&self, stage: Stage) -> Result<(), AutoshortsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.fault {
            None => Ok(()),
            Some(Fault::Error(message)) => Err(match stage {
                Stage::Topic => AutoshortsError::trends(message.clone()),
                Stage::Publish => AutoshortsError::publish(message.clone()),
                Stage::Script | Stage::Video => AutoshortsError::provider(message.clone()),
            }),
            Some(Fault::Panic(message)) => panic!("{message}"),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// A candidate topic for tests.
pub fn sample_idea(keyword: &str, score: f64) -> TrendIdea {
    TrendIdea {
        keyword: keyword.to_string(),
        score,
        description: Some(format!("{keyword} news")),
        region: Some("US".to_string()),
    }
}

/// A topic source returning a fixed candidate list.
#[derive(Debug, Default)]
pub struct MockTopicSource {
    topics: Vec<TrendIdea>,
    regions: Mutex<Vec<String>>,
    behavior: Behavior,
}

impl MockTopicSource {
    pub fn new(topics: Vec<TrendIdea>) -> Self {
        Self {
            topics,
            ..Self::default()
        }
    }

    /// A source that finds nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_fault(mut self, fault: Fault) -> Self {
        self.behavior.fault = Some(fault);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.behavior.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.behavior.calls()
    }

    /// Regions requested so far, in call order.
    pub async fn regions(&self) -> Vec<String> {
        self.regions.lock().await.clone()
    }
}

impl StageAdapter for MockTopicSource {
    fn name(&self) -> &str {
        "mock-topics"
    }

    fn stage(&self) -> Stage {
        Stage::Topic
    }
}

#[async_trait]
impl TopicSource for MockTopicSource {
    async fn discover(&self, region: &str) -> Result<Vec<TrendIdea>, AutoshortsError> {
        self.regions.lock().await.push(region.to_string());
        self.behavior.enter(Stage::Topic).await?;
        Ok(self.topics.clone())
    }
}

/// A script drafter deriving a script from the topic keyword.
#[derive(Debug, Default)]
pub struct MockScriptDrafter {
    keywords: Mutex<Vec<String>>,
    behavior: Behavior,
}

impl MockScriptDrafter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fault(mut self, fault: Fault) -> Self {
        self.behavior.fault = Some(fault);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.behavior.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.behavior.calls()
    }

    /// Keywords drafted so far, in call order.
    pub async fn keywords(&self) -> Vec<String> {
        self.keywords.lock().await.clone()
    }

    /// The script this mock produces for `keyword`.
    pub fn script_for(keyword: &str) -> ScriptDraft {
        ScriptDraft {
            title: format!("Why everyone is talking about {keyword}"),
            description: format!("The story behind {keyword}. Follow for more."),
            hook: format!("You will not believe what happened with {keyword}."),
            script: format!("1. Open on {keyword}\n2. Explain\n3. Call to action"),
            hashtags: vec!["#shorts".to_string(), "#trending".to_string()],
        }
    }
}

impl StageAdapter for MockScriptDrafter {
    fn name(&self) -> &str {
        "mock-drafter"
    }

    fn stage(&self) -> Stage {
        Stage::Script
    }
}

#[async_trait]
impl ScriptDrafter for MockScriptDrafter {
    async fn draft(&self, topic: &TrendIdea) -> Result<ScriptDraft, AutoshortsError> {
        self.keywords.lock().await.push(topic.keyword.clone());
        self.behavior.enter(Stage::Script).await?;
        Ok(Self::script_for(&topic.keyword))
    }
}

/// A video synthesizer returning a URL derived from the topic keyword.
#[derive(Debug, Default)]
pub struct MockVideoSynthesizer {
    behavior: Behavior,
}

impl MockVideoSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fault(mut self, fault: Fault) -> Self {
        self.behavior.fault = Some(fault);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.behavior.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.behavior.calls()
    }

    /// The asset URL this mock produces for `keyword`.
    pub fn url_for(keyword: &str) -> String {
        format!("https://cdn.example.com/{}.mp4", keyword.replace(' ', "-"))
    }
}

impl StageAdapter for MockVideoSynthesizer {
    fn name(&self) -> &str {
        "mock-synthesizer"
    }

    fn stage(&self) -> Stage {
        Stage::Video
    }
}

#[async_trait]
impl VideoSynthesizer for MockVideoSynthesizer {
    async fn synthesize(
        &self,
        topic: &TrendIdea,
        _script: &ScriptDraft,
    ) -> Result<VideoAsset, AutoshortsError> {
        self.behavior.enter(Stage::Video).await?;
        Ok(VideoAsset {
            video_url: Self::url_for(&topic.keyword),
            preview_image: None,
            provider: "mock".to_string(),
            raw: None,
        })
    }
}

/// A publisher returning a fixed outcome.
#[derive(Debug)]
pub struct MockPublisher {
    outcome: UploadResult,
    behavior: Behavior,
}

impl Default for MockPublisher {
    fn default() -> Self {
        Self {
            outcome: UploadResult::success(
                "mock-video-1",
                "https://youtube.com/watch?v=mock-video-1",
            ),
            behavior: Behavior::default(),
        }
    }
}

impl MockPublisher {
    /// A publisher that always succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// A publisher that returns `outcome` as data.
    pub fn with_outcome(outcome: UploadResult) -> Self {
        Self {
            outcome,
            behavior: Behavior::default(),
        }
    }

    pub fn with_fault(mut self, fault: Fault) -> Self {
        self.behavior.fault = Some(fault);
        self
    }

    pub fn calls(&self) -> usize {
        self.behavior.calls()
    }
}

impl StageAdapter for MockPublisher {
    fn name(&self) -> &str {
        "mock-publisher"
    }

    fn stage(&self) -> Stage {
        Stage::Publish
    }
}

#[async_trait]
impl Publisher for MockPublisher {
    async fn publish(
        &self,
        _script: &ScriptDraft,
        _video: &VideoAsset,
    ) -> Result<UploadResult, AutoshortsError> {
        self.behavior.enter(Stage::Publish).await?;
        Ok(self.outcome.clone())
    }
}
