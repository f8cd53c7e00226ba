// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route tests for the autoshorts gateway, driven through `tower::ServiceExt::oneshot`.

use autoshorts_gateway::{router, GatewayState};
use autoshorts_test_utils::{Fault, MockScriptDrafter, PipelineHarness};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app(harness: &PipelineHarness) -> Router {
    router(GatewayState {
        pipeline: harness.pipeline.clone(),
    })
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn health_reports_run_count() {
    let harness = PipelineHarness::builder().build().unwrap();
    harness.run_keyword("rust", true).await;

    let (status, body) = send(app(&harness), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
    assert_eq!(body["runs"], 1);
}

#[tokio::test]
async fn cron_get_runs_pipeline_with_dry_run() {
    let harness = PipelineHarness::builder().build().unwrap();

    let (status, body) = send(
        app(&harness),
        Method::GET,
        "/api/cron/daily-upload?region=GB&dryRun=true",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["run"]["upload"]["status"], "skipped");
    assert!(body["run"]["completed_at"].is_string());
    assert_eq!(harness.topics.regions().await, vec!["GB"]);
    assert_eq!(harness.publisher.calls(), 0);
}

#[tokio::test]
async fn cron_post_treats_other_dry_run_values_as_false() {
    let harness = PipelineHarness::builder().build().unwrap();

    let (status, body) = send(
        app(&harness),
        Method::POST,
        "/api/cron/daily-upload?dryRun=yes",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["run"]["upload"]["status"], "success");
    assert_eq!(harness.topics.regions().await, vec!["US"]);
    assert_eq!(harness.publisher.calls(), 1);
}

#[tokio::test]
async fn cron_returns_ok_for_failed_runs() {
    let harness = PipelineHarness::builder()
        .with_drafter(MockScriptDrafter::new().with_fault(Fault::error("rate limited")))
        .build()
        .unwrap();

    let (status, body) = send(app(&harness), Method::GET, "/api/cron/daily-upload", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["run"]["error"], "rate limited");
}

#[tokio::test]
async fn create_run_uses_keyword_override() {
    let harness = PipelineHarness::builder().build().unwrap();

    let (status, body) = send(
        app(&harness),
        Method::POST,
        "/v1/runs",
        Some(json!({ "keyword": "northern lights", "dry_run": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["topic"]["keyword"], "northern lights");
    assert_eq!(body["topic"]["score"], 100.0);
    assert_eq!(harness.topics.calls(), 0);
}

#[tokio::test]
async fn list_and_get_runs() {
    let harness = PipelineHarness::builder().build().unwrap();
    let first = harness.run_keyword("first", true).await;
    let second = harness.run_keyword("second", true).await;

    let (status, body) = send(app(&harness), Method::GET, "/v1/runs", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["runs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|run| run["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);

    let uri = format!("/v1/runs/{}", first.id);
    let (status, body) = send(app(&harness), Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["topic"]["keyword"], "first");
}

#[tokio::test]
async fn unknown_run_is_404() {
    let harness = PipelineHarness::builder().build().unwrap();

    let (status, body) = send(app(&harness), Method::GET, "/v1/runs/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "run not found: missing");
}
