//! Classifier adapters
//!
//! Three independent sentiment sources behind one seam: an in-process
//! lexicon analyzer, a remote naive-bayes model server, and a hosted
//! RoBERTa inference endpoint. Each adapter catches its own failures and
//! folds them into an error-shaped [`ClassifierOutput`]; nothing escapes
//! `classify` as an error.

use async_trait::async_trait;
use trisent_common::ClassifierOutput;

pub mod naive_bayes;
pub mod roberta;
pub mod vader;

pub use naive_bayes::NaiveBayesClient;
pub use roberta::RobertaClient;
pub use vader::VaderAnalyzer;

/// Classifier trait - all sentiment sources implement this
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classifier identifier (e.g., "vader", "naive_bayes", "roberta")
    fn name(&self) -> &'static str;

    /// Classify one text.
    ///
    /// Infallible by contract: any underlying failure (network error,
    /// timeout, malformed response) is converted into a
    /// `ClassifierOutput` with `sentiment = error` and a descriptive
    /// message, so one failing source never aborts the others.
    async fn classify(&self, text: &str) -> ClassifierOutput;
}
