//! Naive-bayes model-serving client
//!
//! Talks to a Gradio-style predict endpoint: POST `{"data": [text]}` to
//! `<base>/run/predict`, read back a payload carrying `all_probabilities`
//! (negative, neutral, positive) and a `label`. Some deployments return the
//! payload as a JSON-encoded string, so string payloads are decoded before
//! inspection.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use trisent_common::{ClassifierOutput, Sentiment};

use super::Classifier;

const PREDICT_PATH: &str = "/run/predict";

/// Naive-bayes client errors (internal; folded into `ClassifierOutput`)
#[derive(Debug, Error)]
pub enum NbError {
    /// Network communication error
    #[error("Network error: {0}")]
    Network(String),

    /// Remote call exceeded the configured timeout
    #[error("Naive Bayes API timeout")]
    Timeout,

    /// Endpoint returned an error response
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Response body was not the expected predict payload
    #[error("Unexpected response format")]
    UnexpectedFormat,

    /// Failed to parse response JSON
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Remote naive-bayes classifier client
pub struct NaiveBayesClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl NaiveBayesClient {
    /// Create a new client against the given model-server base URL
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, NbError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NbError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn predict(&self, text: &str) -> Result<ClassifierOutput, NbError> {
        let url = format!("{}{}", self.base_url, PREDICT_PATH);

        tracing::debug!(url = %url, "Querying naive-bayes model server");

        let response = self
            .http_client
            .post(&url)
            .json(&serde_json::json!({ "data": [text] }))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NbError::Timeout
                } else {
                    NbError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(NbError::Api(status.as_u16(), error_text));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| NbError::Parse(e.to_string()))?;

        // Gradio wraps the model output in {"data": [payload]}
        let payload = body
            .get("data")
            .and_then(|d| d.get(0))
            .ok_or(NbError::UnexpectedFormat)?;

        parse_predict_payload(payload)
    }
}

/// Extract a classifier output from the model's predict payload.
///
/// Accepts either a JSON object or a JSON-encoded string containing one.
/// The payload must carry `all_probabilities`; a missing `label` is an
/// unknown (non-vote) sentiment, not a failure.
fn parse_predict_payload(payload: &Value) -> Result<ClassifierOutput, NbError> {
    let decoded;
    let payload = match payload {
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(v) => {
                decoded = v;
                &decoded
            }
            // Undecodable strings fall through and fail the object check
            Err(_) => payload,
        },
        other => other,
    };

    let object = payload.as_object().ok_or(NbError::UnexpectedFormat)?;
    let probabilities = object
        .get("all_probabilities")
        .and_then(|p| p.as_array())
        .ok_or(NbError::UnexpectedFormat)?;

    let prob = |i: usize| probabilities.get(i).and_then(Value::as_f64).unwrap_or(0.0);
    let sentiment = object
        .get("label")
        .and_then(Value::as_str)
        .map(Sentiment::from_label)
        .unwrap_or(Sentiment::Unknown);

    Ok(ClassifierOutput::scored(prob(0), prob(1), prob(2), sentiment))
}

#[async_trait]
impl Classifier for NaiveBayesClient {
    fn name(&self) -> &'static str {
        "naive_bayes"
    }

    async fn classify(&self, text: &str) -> ClassifierOutput {
        match self.predict(text).await {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(error = %e, "Naive-bayes classification failed");
                ClassifierOutput::failure(e.to_string())
            }
        }
    }
}
