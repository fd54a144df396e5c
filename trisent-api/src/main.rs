//! Trisent API - Main entry point
//!
//! Sentiment consensus microservice: classifies short texts by consulting
//! three independent classifiers (in-process lexicon, remote naive-bayes
//! model server, hosted RoBERTa inference endpoint) and combining their
//! verdicts into one consensus.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trisent_api::services::{NaiveBayesClient, RobertaClient, VaderAnalyzer};
use trisent_api::{build_router, AppState};
use trisent_common::Config;

/// Command-line arguments for trisent-api
#[derive(Parser, Debug)]
#[command(name = "trisent-api")]
#[command(about = "Sentiment consensus microservice")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "TRISENT_PORT")]
    port: Option<u16>,

    /// Path to TOML config file
    #[arg(short, long, env = "TRISENT_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trisent_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Trisent API v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    // Parse command-line arguments
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref()).context("Failed to load config")?;
    if let Some(port) = args.port {
        config.port = port;
    }

    info!("Naive-bayes endpoint: {}", config.nb_api_url);
    info!("Inference endpoint: {}", config.hf_api_url);
    if config.hf_token.is_none() {
        info!("No HF_TOKEN configured; inference calls are unauthenticated");
    }

    // Construct the three classifiers once; they are reused across requests
    let vader = Arc::new(VaderAnalyzer::new());
    let naive_bayes = Arc::new(
        NaiveBayesClient::new(config.nb_api_url.as_str(), config.classify_timeout)
            .context("Failed to create naive-bayes client")?,
    );
    let roberta = Arc::new(
        RobertaClient::new(
            config.hf_api_url.as_str(),
            config.hf_token.clone(),
            config.classify_timeout,
        )
        .context("Failed to create RoBERTa client")?,
    );

    let port = config.port;
    let state = AppState::new(config, vader, naive_bayes, roberta);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
