//! HTTP API handlers for trisent-api

pub mod analyze;
pub mod health;

pub use analyze::{analyze, method_not_allowed, AnalyzeRequest, AnalyzeResponse};
pub use health::{health_check, health_routes};
