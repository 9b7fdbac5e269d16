// ABOUTME: HTTP server binary for the Maresia training tracker
// ABOUTME: Loads configuration and history, then serves the tracker API with graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Maresia Server Binary
//!
//! Starts the tracker HTTP API: training session recording, stage results,
//! extra variables, and the prognosis endpoint, backed by the JSON history
//! file.

use anyhow::Result;
use clap::Parser;
use maresia::{
    config::ServerConfig,
    logging,
    models::AthleteRecord,
    routes::{self, ServerResources},
    storage::{HistoryRepository, JsonFileHistory},
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "maresia-server")]
#[command(about = "Maresia - single-athlete training tracker API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override history file path
    #[arg(long)]
    history_file: Option<PathBuf>,

    /// Athlete name used when no history exists yet
    #[arg(long, default_value = "Wesley Leite")]
    athlete_name: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration from environment, then apply CLI overrides
    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(history_file) = args.history_file {
        config.history.path = history_file;
    }

    logging::init_from_env()?;

    info!("Starting Maresia tracker server");
    info!("{}", config.summary());

    let history = JsonFileHistory::new(config.history.path.clone());
    let athlete = match history.load().await? {
        Some(record) => record,
        None => {
            info!(athlete = %args.athlete_name, "No history found, starting a fresh record");
            AthleteRecord::new(args.athlete_name)
        }
    };

    let resources = Arc::new(ServerResources::new(athlete, Box::new(history), config.clone()));
    let app = routes::router(resources);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    info!("Shutdown signal received");
}
