// ABOUTME: Server binary for the WOT AI Trainer backend
// ABOUTME: Loads configuration, connects the database, and serves the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WOT Fitness

//! # WOT Trainer Server Binary
//!
//! Starts the conversational trainer backend: configuration from the
//! environment, `SQLite` persistence, the Gemini provider, and the axum
//! HTTP surface.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use wot_trainer::{
    config::ServerConfig,
    database::Database,
    llm::{GeminiProvider, LlmProvider},
    logging,
    resources::ServerResources, routes,
};

#[derive(Parser)]
#[command(name = "wot-trainer-server")]
#[command(about = "WOT AI Trainer - conversational workout generation backend")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting WOT AI Trainer backend");
    info!("{}", config.summary());

    let database = Database::connect(&config.database_url)
        .await
        .context("database initialization failed")?;

    let provider = GeminiProvider::from_env(config.llm_model.clone(), config.model_timeout)
        .context("generative provider initialization failed")?;
    info!("Generative provider ready: {}", provider.display_name());

    let resources = Arc::new(ServerResources::new(
        database,
        Arc::new(provider),
        config.clone(),
    ));

    let app = routes::router(resources);
    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("HTTP server listening on {addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated")?;

    info!("Server shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to install shutdown handler: {e}");
    }
}
