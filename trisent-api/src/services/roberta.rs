//! Hosted RoBERTa inference client
//!
//! Calls a Hugging Face style inference endpoint: POST `{"inputs": text}`
//! with an optional bearer token. The response is a list of score lists,
//! one entry per class with raw labels `LABEL_0` (negative), `LABEL_1`
//! (neutral), `LABEL_2` (positive); the highest-scoring label becomes the
//! sentiment. Calls are bounded by a fixed timeout and a timeout is
//! reported distinctly from other network failures.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use trisent_common::{ClassifierOutput, Sentiment};

use super::Classifier;

/// RoBERTa client errors (internal; folded into `ClassifierOutput`)
#[derive(Debug, Error)]
pub enum RobertaError {
    /// Network communication error
    #[error("Network error: {0}")]
    Network(String),

    /// Inference call exceeded the configured timeout
    #[error("HuggingFace API timeout")]
    Timeout,

    /// Endpoint returned an error response
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Response body was not the expected score list
    #[error("Unexpected response format")]
    UnexpectedFormat,

    /// Failed to parse response JSON
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Hosted inference endpoint client
pub struct RobertaClient {
    http_client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl RobertaClient {
    /// Create a new client for the given inference URL
    pub fn new(
        api_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, RobertaError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RobertaError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_url: api_url.into(),
            token,
        })
    }

    async fn infer(&self, text: &str) -> Result<ClassifierOutput, RobertaError> {
        tracing::debug!(url = %self.api_url, "Querying hosted inference endpoint");

        let mut request = self
            .http_client
            .post(&self.api_url)
            .json(&serde_json::json!({ "inputs": text }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                RobertaError::Timeout
            } else {
                RobertaError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RobertaError::Api(status.as_u16(), error_text));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| RobertaError::Parse(e.to_string()))?;

        parse_inference_response(&body)
    }
}

/// Extract a classifier output from the inference response.
///
/// Expects `[[{"label": "LABEL_n", "score": f}, ...]]`. Scores land in
/// their mapped class slot; unmapped labels keep their raw name and can
/// still win best-score selection, surfacing as an unknown (non-vote)
/// sentiment.
fn parse_inference_response(body: &Value) -> Result<ClassifierOutput, RobertaError> {
    let scores = body
        .as_array()
        .and_then(|outer| outer.first())
        .and_then(|inner| inner.as_array())
        .ok_or(RobertaError::UnexpectedFormat)?;

    let mut negative = 0.0;
    let mut neutral = 0.0;
    let mut positive = 0.0;
    let mut best_sentiment = Sentiment::Unknown;
    let mut best_score = 0.0;

    for item in scores {
        let raw_label = item.get("label").and_then(Value::as_str).unwrap_or("");
        let score = item.get("score").and_then(Value::as_f64).unwrap_or(0.0);

        let label = match raw_label {
            "LABEL_0" => Sentiment::Negative,
            "LABEL_1" => Sentiment::Neutral,
            "LABEL_2" => Sentiment::Positive,
            other => Sentiment::from_label(other),
        };

        match label {
            Sentiment::Negative => negative = score,
            Sentiment::Neutral => neutral = score,
            Sentiment::Positive => positive = score,
            _ => {}
        }

        if score > best_score {
            best_score = score;
            best_sentiment = label;
        }
    }

    Ok(ClassifierOutput::scored(
        negative,
        neutral,
        positive,
        best_sentiment,
    ))
}

#[async_trait]
impl Classifier for RobertaClient {
    fn name(&self) -> &'static str {
        "roberta"
    }

    async fn classify(&self, text: &str) -> ClassifierOutput {
        match self.infer(text).await {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(error = %e, "RoBERTa classification failed");
                ClassifierOutput::failure(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn client_creation() {
        let client = RobertaClient::new(
            "https://example.org/models/sentiment",
            Some("token".to_string()),
            Duration::from_secs(5),
        );
        assert!(client.is_ok());
    }

    #[test]
    fn parses_label_scores_and_picks_best() {
        let body = json!([[
            { "label": "LABEL_0", "score": 0.1 },
            { "label": "LABEL_1", "score": 0.2 },
            { "label": "LABEL_2", "score": 0.7 }
        ]]);
        let output = parse_inference_response(&body).unwrap();
        assert_eq!(output.sentiment, Sentiment::Positive);
        assert_eq!(output.negative, Some(0.1));
        assert_eq!(output.neutral, Some(0.2));
        assert_eq!(output.positive, Some(0.7));
    }

    #[test]
    fn already_named_labels_are_accepted() {
        let body = json!([[
            { "label": "negative", "score": 0.8 },
            { "label": "neutral", "score": 0.15 },
            { "label": "positive", "score": 0.05 }
        ]]);
        let output = parse_inference_response(&body).unwrap();
        assert_eq!(output.sentiment, Sentiment::Negative);
        assert_eq!(output.negative, Some(0.8));
    }

    #[test]
    fn empty_score_list_is_unknown() {
        let body = json!([[]]);
        let output = parse_inference_response(&body).unwrap();
        assert_eq!(output.sentiment, Sentiment::Unknown);
        assert_eq!(output.negative, Some(0.0));
    }

    #[test]
    fn unmapped_winning_label_is_unknown() {
        let body = json!([[
            { "label": "LABEL_0", "score": 0.2 },
            { "label": "LABEL_9", "score": 0.8 }
        ]]);
        let output = parse_inference_response(&body).unwrap();
        assert_eq!(output.sentiment, Sentiment::Unknown);
        // Mapped classes still keep their scores
        assert_eq!(output.negative, Some(0.2));
    }

    #[test]
    fn non_list_body_is_unexpected_format() {
        let body = json!({ "error": "loading" });
        let err = parse_inference_response(&body).unwrap_err();
        assert!(matches!(err, RobertaError::UnexpectedFormat));
    }

    #[test]
    fn empty_outer_list_is_unexpected_format() {
        let body = json!([]);
        assert!(matches!(
            parse_inference_response(&body),
            Err(RobertaError::UnexpectedFormat)
        ));
    }

    #[test]
    fn timeout_message_matches_surface() {
        assert_eq!(RobertaError::Timeout.to_string(), "HuggingFace API timeout");
    }
}
