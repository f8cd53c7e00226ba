// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Drives one run through topic selection, script drafting, video synthesis,
//! and publishing.
//!
//! Stages run strictly in sequence with a single attempt each. Every stage
//! returns a `Result`; the driver in [`Pipeline::run_daily_upload`] matches on
//! the outcome (including a caught panic) and funnels it through one
//! finalization call, so every run ends completed and fully logged.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use autoshorts_core::error::{AutoshortsError, UNKNOWN_FAILURE};
use autoshorts_core::traits::{Publisher, ScriptDrafter, TopicSource, VideoSynthesizer};
use autoshorts_core::types::{
    LogLevel, Run, RunId, RunOptions, RunPatch, Stage, TrendIdea, UploadResult, DEFAULT_REGION,
};
use futures::FutureExt;
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::store::RunStore;

// Collaborator panics are recorded on the run through `catch_unwind`, which
// catches nothing when panics abort.
#[cfg(not(panic = "unwind"))]
compile_error!("autoshorts-pipeline must be built with panic = \"unwind\"");

/// Score given to a caller-supplied topic.
pub const OVERRIDE_SCORE: f64 = 100.0;

/// Description given to a caller-supplied topic.
pub const OVERRIDE_DESCRIPTION: &str = "Manual override keyword supplied.";

/// Upload message recorded for dry runs.
pub const DRY_RUN_MESSAGE: &str = "Dry run mode: upload skipped.";

/// The run orchestrator.
///
/// Cheap to share behind an `Arc`; concurrent calls to
/// [`run_daily_upload`](Self::run_daily_upload) each drive their own run.
pub struct Pipeline {
    store: Arc<RunStore>,
    topics: Arc<dyn TopicSource>,
    drafter: Arc<dyn ScriptDrafter>,
    synthesizer: Arc<dyn VideoSynthesizer>,
    publisher: Arc<dyn Publisher>,
    default_region: String,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// The store holding this pipeline's runs.
    pub fn store(&self) -> &Arc<RunStore> {
        &self.store
    }

    /// Region used when a run does not name one.
    pub fn default_region(&self) -> &str {
        &self.default_region
    }

    /// All runs, most recently started first.
    pub fn list_runs(&self) -> Vec<Run> {
        self.store.list()
    }

    pub fn get_run(&self, id: &RunId) -> Option<Run> {
        self.store.get(id)
    }

    /// The collaborator serving each stage, in execution order.
    pub fn collaborators(&self) -> [(Stage, &str); 4] {
        [
            (self.topics.stage(), self.topics.name()),
            (self.drafter.stage(), self.drafter.name()),
            (self.synthesizer.stage(), self.synthesizer.name()),
            (self.publisher.stage(), self.publisher.name()),
        ]
    }

    /// Runs the daily pipeline once and returns the finished run.
    ///
    /// Never fails: every fault, including a panicking collaborator, is
    /// recorded as an `error` log entry and the run's `error` field.
    pub async fn run_daily_upload(&self, options: RunOptions) -> Run {
        let created = self.store.create();
        let id = created.id.clone();
        info!(
            run_id = %id,
            dry_run = options.dry_run,
            override_keyword = options.keyword().is_some(),
            "pipeline run started"
        );

        let outcome = AssertUnwindSafe(self.execute(&id, &options))
            .catch_unwind()
            .await;

        let patch = match outcome {
            Ok(Ok(patch)) => patch,
            Ok(Err(err)) => self.record_fault(&id, err.summary()),
            Err(panic) => self.record_fault(&id, panic_message(panic.as_ref())),
        };
        self.store.complete(&id, patch);

        let run = self.store.get(&id).unwrap_or(created);
        info!(run_id = %id, phase = %run.phase(), "pipeline run finished");
        run
    }

    /// Executes the stages and returns the patch that completes the run.
    async fn execute(
        &self,
        id: &RunId,
        options: &RunOptions,
    ) -> Result<RunPatch, AutoshortsError> {
        let region = options.region_or(&self.default_region).to_string();

        let topic = self.choose_topic(id, options, &region).await?;
        self.store.update(id, |run| run.topic = Some(topic.clone()));

        self.log(id, LogLevel::Info, "Generating script.", None);
        let script = self.drafter.draft(&topic).await?;
        self.store.update(id, |run| run.script = Some(script.clone()));
        self.log(id, LogLevel::Success, "Script generated.", None);

        self.log(id, LogLevel::Info, "Generating video asset.", None);
        let video = self.synthesizer.synthesize(&topic, &script).await?;
        self.store.update(id, |run| run.video = Some(video.clone()));
        self.log(
            id,
            LogLevel::Success,
            "Video generated.",
            Some(json!({ "video_url": video.video_url })),
        );

        if options.dry_run {
            self.log(id, LogLevel::Warn, "Dry run enabled; skipping upload.", None);
            return Ok(RunPatch::upload(UploadResult::skipped(DRY_RUN_MESSAGE)));
        }

        self.log(id, LogLevel::Info, "Uploading video.", None);
        let upload = self.publisher.publish(&script, &video).await?;
        let details = serde_json::to_value(&upload).ok();
        if upload.is_success() {
            self.log(id, LogLevel::Success, "Video uploaded.", details);
        } else {
            self.log(id, LogLevel::Error, "Video upload failed.", details);
        }

        Ok(RunPatch::upload(upload))
    }

    async fn choose_topic(
        &self,
        id: &RunId,
        options: &RunOptions,
        region: &str,
    ) -> Result<TrendIdea, AutoshortsError> {
        if let Some(keyword) = options.keyword() {
            self.log(
                id,
                LogLevel::Info,
                "Using override keyword for upload.",
                Some(json!({ "keyword": keyword })),
            );
            return Ok(TrendIdea {
                keyword: keyword.to_string(),
                score: OVERRIDE_SCORE,
                description: Some(OVERRIDE_DESCRIPTION.to_string()),
                region: Some(region.to_string()),
            });
        }

        self.log(
            id,
            LogLevel::Info,
            "Fetching trending topics.",
            Some(json!({ "region": region, "source": self.topics.name() })),
        );
        let candidates = self.topics.discover(region).await?;
        let best = select_topic(candidates).ok_or_else(|| AutoshortsError::NoTopics {
            region: region.to_string(),
        })?;

        self.log(
            id,
            LogLevel::Success,
            "Selected trending topic.",
            Some(json!({ "keyword": best.keyword, "score": best.score })),
        );
        Ok(best)
    }

    /// Logs a fault and returns the patch that records it on the run.
    fn record_fault(&self, id: &RunId, message: String) -> RunPatch {
        self.log(id, LogLevel::Error, &message, None);
        RunPatch::error(message)
    }

    /// Appends to the run log and mirrors the entry to tracing.
    fn log(
        &self,
        id: &RunId,
        level: LogLevel,
        message: &str,
        details: Option<serde_json::Value>,
    ) {
        match level {
            LogLevel::Info | LogLevel::Success => info!(run_id = %id, %level, "{message}"),
            LogLevel::Warn => warn!(run_id = %id, "{message}"),
            LogLevel::Error => error!(run_id = %id, "{message}"),
        }
        self.store.append_log(id, level, message, details);
    }
}

/// Picks the highest-scoring candidate.
///
/// Among equal scores the first candidate in the collaborator's order wins,
/// matching a stable descending sort.
pub fn select_topic(candidates: Vec<TrendIdea>) -> Option<TrendIdea> {
    candidates
        .into_iter()
        .reduce(|best, next| if next.score > best.score { next } else { best })
}

/// Extracts a readable message from a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_default();

    if message.trim().is_empty() {
        UNKNOWN_FAILURE.to_string()
    } else {
        message
    }
}

/// Builder for [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    store: Option<Arc<RunStore>>,
    topics: Option<Arc<dyn TopicSource>>,
    drafter: Option<Arc<dyn ScriptDrafter>>,
    synthesizer: Option<Arc<dyn VideoSynthesizer>>,
    publisher: Option<Arc<dyn Publisher>>,
    default_region: Option<String>,
}

impl PipelineBuilder {
    /// Shares an existing store. A fresh one is created otherwise.
    pub fn store(mut self, store: Arc<RunStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn topic_source(mut self, topics: Arc<dyn TopicSource>) -> Self {
        self.topics = Some(topics);
        self
    }

    pub fn script_drafter(mut self, drafter: Arc<dyn ScriptDrafter>) -> Self {
        self.drafter = Some(drafter);
        self
    }

    pub fn video_synthesizer(mut self, synthesizer: Arc<dyn VideoSynthesizer>) -> Self {
        self.synthesizer = Some(synthesizer);
        self
    }

    pub fn publisher(mut self, publisher: Arc<dyn Publisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn default_region(mut self, region: impl Into<String>) -> Self {
        self.default_region = Some(region.into());
        self
    }

    /// Builds the pipeline; every collaborator must be set.
    pub fn build(self) -> Result<Pipeline, AutoshortsError> {
        fn require<T>(value: Option<T>, what: &str) -> Result<T, AutoshortsError> {
            value.ok_or_else(|| AutoshortsError::Config(format!("pipeline is missing a {what}")))
        }

        let pipeline = Pipeline {
            store: self.store.unwrap_or_default(),
            topics: require(self.topics, "topic source")?,
            drafter: require(self.drafter, "script drafter")?,
            synthesizer: require(self.synthesizer, "video synthesizer")?,
            publisher: require(self.publisher, "publisher")?,
            default_region: self
                .default_region
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
        };
        for (stage, name) in pipeline.collaborators() {
            debug!(%stage, collaborator = name, "stage collaborator registered");
        }
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use autoshorts_core::traits::StageAdapter;
    use autoshorts_core::types::{RunPhase, ScriptDraft, UploadStatus, VideoAsset};

    use super::*;

    fn idea(keyword: &str, score: f64) -> TrendIdea {
        TrendIdea {
            keyword: keyword.to_string(),
            score,
            description: None,
            region: Some("US".to_string()),
        }
    }

    #[test]
    fn select_topic_takes_highest_score() {
        let best = select_topic(vec![idea("a", 10.0), idea("b", 50.0), idea("c", 20.0)]);
        assert_eq!(best.unwrap().keyword, "b");
    }

    #[test]
    fn select_topic_ties_keep_first_occurrence() {
        let best = select_topic(vec![idea("a", 5.0), idea("b", 50.0), idea("c", 50.0)]);
        assert_eq!(best.unwrap().keyword, "b");
    }

    #[test]
    fn select_topic_empty_is_none() {
        assert!(select_topic(Vec::new()).is_none());
    }

    #[test]
    fn panic_message_from_str_and_string() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload: Box<dyn Any + Send> = Box::new(String::from("kaboom"));
        assert_eq!(panic_message(payload.as_ref()), "kaboom");
    }

    #[test]
    fn panic_message_falls_back_for_opaque_payloads() {
        let payload: Box<dyn Any + Send> = Box::new(42_u32);
        assert_eq!(panic_message(payload.as_ref()), UNKNOWN_FAILURE);
    }

    #[test]
    fn builder_requires_collaborators() {
        let err = Pipeline::builder().build().err().expect("should fail");
        assert!(err.to_string().contains("topic source"), "got: {err}");
    }

    /// One collaborator serving every stage.
    #[derive(Default)]
    struct Stub {
        topics: Vec<TrendIdea>,
        panic_on_video: bool,
        upload: Option<UploadResult>,
    }

    impl StageAdapter for Stub {
        fn name(&self) -> &str {
            "stub"
        }

        fn stage(&self) -> Stage {
            Stage::Topic
        }
    }

    #[async_trait]
    impl TopicSource for Stub {
        async fn discover(&self, _region: &str) -> Result<Vec<TrendIdea>, AutoshortsError> {
            Ok(self.topics.clone())
        }
    }

    #[async_trait]
    impl ScriptDrafter for Stub {
        async fn draft(&self, topic: &TrendIdea) -> Result<ScriptDraft, AutoshortsError> {
            Ok(ScriptDraft {
                title: topic.keyword.clone(),
                description: "desc".into(),
                hook: "hook".into(),
                script: "script".into(),
                hashtags: vec!["#shorts".into()],
            })
        }
    }

    #[async_trait]
    impl VideoSynthesizer for Stub {
        async fn synthesize(
            &self,
            _topic: &TrendIdea,
            _script: &ScriptDraft,
        ) -> Result<VideoAsset, AutoshortsError> {
            if self.panic_on_video {
                panic!("synthesizer exploded");
            }
            Ok(VideoAsset {
                video_url: "https://cdn.example.com/v.mp4".into(),
                preview_image: None,
                provider: "stub".into(),
                raw: None,
            })
        }
    }

    #[async_trait]
    impl Publisher for Stub {
        async fn publish(
            &self,
            _script: &ScriptDraft,
            _video: &VideoAsset,
        ) -> Result<UploadResult, AutoshortsError> {
            Ok(self
                .upload
                .clone()
                .unwrap_or_else(|| UploadResult::success("v1", "https://youtube.com/watch?v=v1")))
        }
    }

    fn pipeline(stub: Stub) -> Pipeline {
        let stub = Arc::new(stub);
        Pipeline::builder()
            .topic_source(stub.clone())
            .script_drafter(stub.clone())
            .video_synthesizer(stub.clone())
            .publisher(stub)
            .build()
            .unwrap()
    }

    fn messages(run: &Run) -> Vec<&str> {
        run.logs.iter().map(|entry| entry.message.as_str()).collect()
    }

    #[tokio::test]
    async fn dry_run_override_logs_every_stage_in_order() {
        let pipeline = pipeline(Stub::default());
        let run = pipeline
            .run_daily_upload(RunOptions {
                override_keyword: Some("aurora".into()),
                dry_run: true,
                ..RunOptions::default()
            })
            .await;

        assert_eq!(
            messages(&run),
            vec![
                "Daily upload pipeline started.",
                "Using override keyword for upload.",
                "Generating script.",
                "Script generated.",
                "Generating video asset.",
                "Video generated.",
                "Dry run enabled; skipping upload.",
            ]
        );
        let upload = run.upload.as_ref().unwrap();
        assert_eq!(upload.status, UploadStatus::Skipped);
        assert_eq!(upload.message.as_deref(), Some(DRY_RUN_MESSAGE));
        assert_eq!(run.topic.as_ref().unwrap().score, OVERRIDE_SCORE);
        assert!(run.completed_at.is_some());
        assert_eq!(pipeline.get_run(&run.id), Some(run));
    }

    #[tokio::test]
    async fn collaborator_panic_completes_the_run_and_freezes_it() {
        let pipeline = pipeline(Stub {
            panic_on_video: true,
            ..Stub::default()
        });
        let run = pipeline
            .run_daily_upload(RunOptions {
                override_keyword: Some("aurora".into()),
                ..RunOptions::default()
            })
            .await;

        assert_eq!(run.error.as_deref(), Some("synthesizer exploded"));
        assert_eq!(run.phase(), RunPhase::Failed);
        assert!(run.script.is_some());
        assert!(run.video.is_none());
        assert!(run.completed_at.is_some());
        let last = run.last_log().unwrap();
        assert_eq!(last.level, LogLevel::Error);
        assert_eq!(last.message, "synthesizer exploded");

        let after = pipeline
            .store()
            .append_log(&run.id, LogLevel::Info, "late write", None)
            .unwrap();
        assert_eq!(after, run);
    }

    #[tokio::test]
    async fn empty_discovery_fails_the_run() {
        let pipeline = pipeline(Stub::default());
        let run = pipeline.run_daily_upload(RunOptions::default()).await;

        assert_eq!(run.error.as_deref(), Some("No trending topics found."));
        assert!(run.topic.is_none());
        assert_eq!(
            messages(&run),
            vec![
                "Daily upload pipeline started.",
                "Fetching trending topics.",
                "No trending topics found.",
            ]
        );
    }

    #[tokio::test]
    async fn failed_upload_is_an_outcome_not_an_error() {
        let pipeline = pipeline(Stub {
            topics: vec![idea("low", 5.0), idea("high", 9.0)],
            upload: Some(UploadResult::failed("quota exceeded")),
            ..Stub::default()
        });
        let run = pipeline.run_daily_upload(RunOptions::default()).await;

        assert!(run.error.is_none());
        assert_eq!(run.topic.as_ref().unwrap().keyword, "high");
        assert_eq!(run.phase(), RunPhase::PublishFailed);
        let last = run.last_log().unwrap();
        assert_eq!(last.level, LogLevel::Error);
        assert_eq!(last.message, "Video upload failed.");
        assert_eq!(last.details.as_ref().unwrap()["status"], "failed");
    }
}
