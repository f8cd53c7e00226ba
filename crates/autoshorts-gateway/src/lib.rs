// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the autoshorts pipeline.
//!
//! Exposes the scheduled-trigger endpoint, a JSON API for starting and
//! inspecting runs, and an unauthenticated health probe.

pub mod handlers;
pub mod server;

pub use server::{router, start_server, GatewayState, ServerConfig};
