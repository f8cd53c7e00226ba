// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `autoshorts run` implementation.

use autoshorts_config::AutoshortsConfig;
use autoshorts_core::types::RunOptions;
use autoshorts_core::AutoshortsError;
use tracing::info;

use crate::wiring::build_pipeline;

/// Executes a single run and prints the finished record to stdout.
///
/// A failed run is still a successful command; the record carries the error.
pub async fn run_once(
    config: AutoshortsConfig,
    region: Option<String>,
    keyword: Option<String>,
    dry_run: bool,
) -> Result<(), AutoshortsError> {
    let pipeline = build_pipeline(&config)?;
    let run = pipeline
        .run_daily_upload(RunOptions {
            region,
            override_keyword: keyword,
            dry_run,
        })
        .await;
    info!(run_id = %run.id, phase = %run.phase(), "run finished");

    let json = serde_json::to_string_pretty(&run)
        .map_err(|e| AutoshortsError::Internal(format!("failed to serialize run: {e}")))?;
    println!("{json}");
    Ok(())
}
