// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Autoshorts - a daily trending-topic short video pipeline.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod run;
mod serve;
mod wiring;

use std::path::PathBuf;

use autoshorts_config::AutoshortsConfig;
use clap::{Parser, Subcommand};

/// Autoshorts - a daily trending-topic short video pipeline.
#[derive(Parser, Debug)]
#[command(name = "autoshorts", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP gateway.
    Serve,
    /// Execute one pipeline run and print the run record as JSON.
    Run {
        /// Region code for topic discovery.
        #[arg(long)]
        region: Option<String>,
        /// Use this keyword instead of discovering a trending topic.
        #[arg(long)]
        keyword: Option<String>,
        /// Skip the upload stage.
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref());
    init_tracing(&config.pipeline.log_level);

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Run {
            region,
            keyword,
            dry_run,
        }) => run::run_once(config, region, keyword, dry_run).await,
        None => {
            println!("autoshorts: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("autoshorts: {e}");
        std::process::exit(1);
    }
}

/// Loads and validates configuration, exiting with rendered diagnostics on failure.
fn load_config(path: Option<&std::path::Path>) -> AutoshortsConfig {
    let loaded = match path {
        Some(path) => autoshorts_config::load_and_validate_path(path),
        None => autoshorts_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            autoshorts_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("autoshorts={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
