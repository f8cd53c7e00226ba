// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `autoshorts serve` implementation.

use std::sync::Arc;

use autoshorts_config::AutoshortsConfig;
use autoshorts_core::AutoshortsError;
use autoshorts_gateway::{GatewayState, ServerConfig};
use tracing::info;

use crate::wiring::build_pipeline;

/// Starts the gateway and serves until the process is stopped.
pub async fn run_serve(config: AutoshortsConfig) -> Result<(), AutoshortsError> {
    let pipeline = Arc::new(build_pipeline(&config)?);
    info!(
        default_region = %pipeline.default_region(),
        "pipeline ready"
    );

    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };
    autoshorts_gateway::start_server(&server_config, GatewayState { pipeline }).await
}
