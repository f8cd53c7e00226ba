// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use autoshorts_core::types::{Run, RunId, RunOptions};
use autoshorts_core::AutoshortsError;

use crate::server::GatewayState;

/// Query parameters for the scheduled trigger.
#[derive(Debug, Default, Deserialize)]
pub struct CronParams {
    #[serde(default)]
    pub region: Option<String>,
    /// Only the literal `"true"` enables a dry run.
    #[serde(default, rename = "dryRun")]
    pub dry_run: Option<String>,
}

/// Request body for POST /v1/runs.
#[derive(Debug, Default, Deserialize)]
pub struct CreateRunRequest {
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub dry_run: bool,
}

/// Response body for the scheduled trigger.
#[derive(Debug, Serialize)]
pub struct CronResponse {
    pub ok: bool,
    pub run: Run,
}

/// Response body for GET /v1/runs.
#[derive(Debug, Serialize)]
pub struct RunListResponse {
    pub runs: Vec<Run>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Number of runs recorded since startup.
    pub runs: usize,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        runs: state.pipeline.store().len(),
    })
}

/// GET|POST /api/cron/daily-upload
///
/// Runs the pipeline to completion. A failed run is still a 200; callers
/// inspect `run.error` and `run.upload`.
pub async fn cron_daily_upload(
    State(state): State<GatewayState>,
    Query(params): Query<CronParams>,
) -> Json<CronResponse> {
    let options = RunOptions {
        region: params.region,
        override_keyword: None,
        dry_run: params.dry_run.as_deref() == Some("true"),
    };
    let run = state.pipeline.run_daily_upload(options).await;
    Json(CronResponse { ok: true, run })
}

/// POST /v1/runs
pub async fn create_run(
    State(state): State<GatewayState>,
    Json(body): Json<CreateRunRequest>,
) -> Json<Run> {
    let options = RunOptions {
        region: body.region,
        override_keyword: body.keyword,
        dry_run: body.dry_run,
    };
    Json(state.pipeline.run_daily_upload(options).await)
}

/// GET /v1/runs
pub async fn list_runs(State(state): State<GatewayState>) -> Json<RunListResponse> {
    Json(RunListResponse {
        runs: state.pipeline.list_runs(),
    })
}

/// GET /v1/runs/{id}
pub async fn get_run(State(state): State<GatewayState>, Path(id): Path<String>) -> Response {
    match state.pipeline.get_run(&RunId::from(id.as_str())) {
        Some(run) => Json(run).into_response(),
        None => {
            let err = AutoshortsError::RunNotFound { id };
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}
