//! trisent-api library - sentiment consensus microservice
//!
//! One analyze endpoint fans a text out to three independent sentiment
//! classifiers and folds their verdicts into a single explainable
//! consensus. The classifiers are constructed once at startup and shared
//! across requests through [`AppState`].

use std::sync::Arc;

use axum::{
    routing::post,
    Router,
};
use tower_http::cors::CorsLayer;
use trisent_common::Config;

pub mod api;
pub mod error;
pub mod services;

use services::Classifier;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Service configuration
    pub config: Arc<Config>,
    /// In-process lexicon analyzer
    pub vader: Arc<dyn Classifier>,
    /// Remote naive-bayes model-serving client
    pub naive_bayes: Arc<dyn Classifier>,
    /// Hosted RoBERTa inference client
    pub roberta: Arc<dyn Classifier>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        config: Config,
        vader: Arc<dyn Classifier>,
        naive_bayes: Arc<dyn Classifier>,
        roberta: Arc<dyn Classifier>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            vader,
            naive_bayes,
            roberta,
        }
    }
}

/// Build application router
///
/// Only POST is accepted on /api/analyze; every other method falls back to
/// a 405 with a JSON error body. CORS is permissive so browser frontends
/// on any origin can submit texts (the layer also answers the preflight
/// OPTIONS).
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/analyze",
            post(api::analyze).fallback(api::method_not_allowed),
        )
        .merge(api::health_routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
}
