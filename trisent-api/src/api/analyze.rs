//! The analyze endpoint
//!
//! POST /api/analyze takes `{"text": "..."}`, fans the (truncated) text out
//! to the three classifiers concurrently, aggregates their verdicts, and
//! returns the per-classifier breakdowns alongside the consensus
//! conclusion.

use axum::{body::Bytes, extract::State, http::Method, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use trisent_common::{aggregate, ClassifierOutput, ConsensusResult};

use crate::error::ApiError;
use crate::AppState;

/// Request body for POST /api/analyze
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Response body: one breakdown per classifier plus the consensus
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub vader: ClassifierOutput,
    pub naive_bayes: ClassifierOutput,
    pub roberta: ClassifierOutput,
    pub conclusion: ConsensusResult,
}

/// POST /api/analyze
///
/// The body is read raw so that malformed JSON and missing text produce
/// the documented 400 bodies rather than the framework's rejection text.
/// An empty body is treated as an empty JSON object.
pub async fn analyze(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let request: AnalyzeRequest = if body.is_empty() {
        AnalyzeRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|_| ApiError::BadRequest("Invalid JSON".to_string()))?
    };

    let text = request.text.unwrap_or_default();
    let text = text.trim();
    if text.is_empty() {
        return Err(ApiError::BadRequest("Missing 'text'".to_string()));
    }

    let truncated = truncate_chars(text, state.config.max_text_len);
    info!(chars = truncated.chars().count(), "Analyze request");

    // Classifiers are independent; the slowest one must not serialize the
    // others, so fan out concurrently and collect all three.
    let (vader, naive_bayes, roberta) = tokio::join!(
        state.vader.classify(truncated),
        state.naive_bayes.classify(truncated),
        state.roberta.classify(truncated),
    );

    let conclusion = aggregate([
        (state.vader.name(), &vader),
        (state.naive_bayes.name(), &naive_bayes),
        (state.roberta.name(), &roberta),
    ]);

    debug!(
        vader = vader.sentiment.as_str(),
        naive_bayes = naive_bayes.sentiment.as_str(),
        roberta = roberta.sentiment.as_str(),
        final_sentiment = conclusion.final_sentiment.as_str(),
        "Consensus computed"
    );

    Ok(Json(AnalyzeResponse {
        vader,
        naive_bayes,
        roberta,
        conclusion,
    }))
}

/// Fallback for non-POST methods on /api/analyze
///
/// Rejected methods answer with a JSON error body (e.g.
/// `{"error": "GET not allowed"}`), the same shape every other error on
/// this endpoint carries. Preflight OPTIONS never reaches this handler;
/// the CORS layer answers it first.
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(format!("{} not allowed", method))
}

/// Truncate to at most `max_chars` characters, on a char boundary
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_chars("hello", 2048), "hello");
    }

    #[test]
    fn long_text_is_capped_in_chars() {
        let text = "a".repeat(3000);
        assert_eq!(truncate_chars(&text, 2048).len(), 2048);
    }

    #[test]
    fn truncation_respects_multibyte_boundaries() {
        let text = "é".repeat(10);
        let cut = truncate_chars(&text, 4);
        assert_eq!(cut.chars().count(), 4);
        assert_eq!(cut, "éééé");
    }

    #[test]
    fn request_parses_with_and_without_text() {
        let req: AnalyzeRequest = serde_json::from_str("{\"text\": \"hi\"}").unwrap();
        assert_eq!(req.text.as_deref(), Some("hi"));

        let req: AnalyzeRequest = serde_json::from_str("{}").unwrap();
        assert!(req.text.is_none());
    }
}
