//! Data model for classifier outputs
//!
//! Every classifier, whatever its transport, is normalized to a
//! [`ClassifierOutput`] before it reaches the consensus aggregator. The
//! serialized shape matches the wire format of the analyze endpoint:
//! per-class scores, the chosen `sentiment` label, and an optional `error`
//! message when the classifier failed.

use serde::{Deserialize, Serialize};

/// A single classifier's chosen label for one text.
///
/// Only the first three variants count as votes; `Unknown` covers a
/// classifier that answered but could not commit to a class, `Error` a
/// classifier that failed outright (network, timeout, malformed response).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
    Unknown,
    Error,
}

impl Sentiment {
    /// Whether this label contributes a vote to the consensus.
    pub fn is_vote(self) -> bool {
        matches!(self, Sentiment::Negative | Sentiment::Neutral | Sentiment::Positive)
    }

    /// Map a free-form label string from a remote model to a sentiment.
    ///
    /// Anything outside the three valid classes becomes `Unknown` (a
    /// non-vote), never an error.
    pub fn from_label(label: &str) -> Self {
        match label {
            "negative" => Sentiment::Negative,
            "neutral" => Sentiment::Neutral,
            "positive" => Sentiment::Positive,
            _ => Sentiment::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Positive => "positive",
            Sentiment::Unknown => "unknown",
            Sentiment::Error => "error",
        }
    }
}

/// Final consensus outcome.
///
/// Same label space as [`Sentiment`] minus `Unknown`: when no classifier
/// produced a valid vote the consensus is `Error`, never `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Negative,
    Neutral,
    Positive,
    Error,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Negative => "negative",
            Verdict::Neutral => "neutral",
            Verdict::Positive => "positive",
            Verdict::Error => "error",
        }
    }
}

/// Result of one classifier on one text.
///
/// Scores are probabilities/intensities in [0,1] and are not required to
/// sum to 1; adapters may return partial data (all score fields absent on
/// failure). Invariant: `error.is_some()` implies `sentiment == Error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierOutput {
    /// Negative-class score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative: Option<f64>,
    /// Neutral-class score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neutral: Option<f64>,
    /// Positive-class score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positive: Option<f64>,
    /// Normalized compound score in [-1, 1] (lexicon analyzer only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compound: Option<f64>,
    /// The classifier's single chosen label
    pub sentiment: Sentiment,
    /// Failure description; present only when `sentiment` is `Error`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ClassifierOutput {
    /// Output for a classifier that failed; carries no scores.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            negative: None,
            neutral: None,
            positive: None,
            compound: None,
            sentiment: Sentiment::Error,
            error: Some(message.into()),
        }
    }

    /// Output for a classifier that produced a full per-class breakdown.
    pub fn scored(negative: f64, neutral: f64, positive: f64, sentiment: Sentiment) -> Self {
        Self {
            negative: Some(negative),
            neutral: Some(neutral),
            positive: Some(positive),
            compound: None,
            sentiment,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_vote_classification() {
        assert!(Sentiment::Positive.is_vote());
        assert!(Sentiment::Negative.is_vote());
        assert!(Sentiment::Neutral.is_vote());
        assert!(!Sentiment::Unknown.is_vote());
        assert!(!Sentiment::Error.is_vote());
    }

    #[test]
    fn label_mapping_is_strict() {
        assert_eq!(Sentiment::from_label("positive"), Sentiment::Positive);
        assert_eq!(Sentiment::from_label("negative"), Sentiment::Negative);
        assert_eq!(Sentiment::from_label("neutral"), Sentiment::Neutral);
        assert_eq!(Sentiment::from_label("POSITIVE"), Sentiment::Unknown);
        assert_eq!(Sentiment::from_label("mixed"), Sentiment::Unknown);
        assert_eq!(Sentiment::from_label(""), Sentiment::Unknown);
    }

    #[test]
    fn serializes_lowercase_labels() {
        let json = serde_json::to_string(&Sentiment::Positive).unwrap();
        assert_eq!(json, "\"positive\"");
        let json = serde_json::to_string(&Verdict::Error).unwrap();
        assert_eq!(json, "\"error\"");
    }

    #[test]
    fn failure_output_shape() {
        let out = ClassifierOutput::failure("connection refused");
        assert_eq!(out.sentiment, Sentiment::Error);
        assert_eq!(out.error.as_deref(), Some("connection refused"));
        assert!(out.negative.is_none());

        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["sentiment"], "error");
        assert_eq!(json["error"], "connection refused");
        // Absent scores are omitted from the wire shape entirely
        assert!(json.get("negative").is_none());
        assert!(json.get("compound").is_none());
    }

    #[test]
    fn scored_output_roundtrip() {
        let out = ClassifierOutput::scored(0.1, 0.2, 0.7, Sentiment::Positive);
        let json = serde_json::to_string(&out).unwrap();
        let back: ClassifierOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, out);
    }
}
