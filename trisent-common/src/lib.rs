//! # Trisent Common Library
//!
//! Shared code for the Trisent sentiment-consensus service:
//! - Data model (classifier outputs, sentiment labels)
//! - Consensus aggregation (the vote-grouping core)
//! - Configuration loading
//! - Error types

pub mod config;
pub mod consensus;
pub mod error;
pub mod types;

pub use config::Config;
pub use consensus::{aggregate, ConsensusResult};
pub use error::{Error, Result};
pub use types::{ClassifierOutput, Sentiment, Verdict};
