//! Configuration loading
//!
//! Settings resolve in priority order:
//! 1. Command-line argument (handled by the binary, highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{Error, Result};

/// Default port for the analyze service
pub const DEFAULT_PORT: u16 = 5810;

/// Maximum text length accepted by the analyze endpoint, in characters.
/// Longer input is truncated, not rejected.
pub const MAX_TEXT_LEN: usize = 2048;

/// Fixed timeout for each remote classifier call
pub const DEFAULT_CLASSIFY_TIMEOUT_SECS: u64 = 5;

const DEFAULT_HF_API_URL: &str =
    "https://router.huggingface.co/hf-inference/models/cardiffnlp/twitter-roberta-base-sentiment";
const DEFAULT_NB_API_URL: &str =
    "https://maksimilijankatavic-nb-sentiment-classifier.hf.space";

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP server listens on
    pub port: u16,
    /// Base URL of the naive-bayes model-serving endpoint
    pub nb_api_url: String,
    /// URL of the hosted RoBERTa inference endpoint
    pub hf_api_url: String,
    /// Bearer token for the hosted inference endpoint, if any
    pub hf_token: Option<String>,
    /// Per-call timeout toward remote classifiers
    pub classify_timeout: Duration,
    /// Character cap applied to incoming text before classification
    pub max_text_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            nb_api_url: DEFAULT_NB_API_URL.to_string(),
            hf_api_url: DEFAULT_HF_API_URL.to_string(),
            hf_token: None,
            classify_timeout: Duration::from_secs(DEFAULT_CLASSIFY_TIMEOUT_SECS),
            max_text_len: MAX_TEXT_LEN,
        }
    }
}

impl Config {
    /// Load configuration: compiled defaults, overlaid by the TOML config
    /// file (explicit path, or the per-user default location), overlaid by
    /// environment variables. CLI overrides are applied by the binary on
    /// top of the result.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        let file = match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Some(path.to_path_buf())
            }
            None => default_config_file().filter(|p| p.exists()),
        };

        if let Some(path) = file {
            config.apply_file(&path)?;
        }
        config.apply_env();

        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path)?;
        let value: toml::Value = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

        if let Some(port) = value.get("port").and_then(|v| v.as_integer()) {
            self.port = u16::try_from(port)
                .map_err(|_| Error::Config(format!("port out of range: {}", port)))?;
        }
        if let Some(url) = value.get("nb_api_url").and_then(|v| v.as_str()) {
            self.nb_api_url = url.to_string();
        }
        if let Some(url) = value.get("hf_api_url").and_then(|v| v.as_str()) {
            self.hf_api_url = url.to_string();
        }
        if let Some(token) = value.get("hf_token").and_then(|v| v.as_str()) {
            self.hf_token = Some(token.to_string());
        }
        if let Some(secs) = value.get("classify_timeout_secs").and_then(|v| v.as_integer()) {
            if secs <= 0 {
                return Err(Error::Config(format!(
                    "classify_timeout_secs must be positive, got {}",
                    secs
                )));
            }
            self.classify_timeout = Duration::from_secs(secs as u64);
        }

        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("TRISENT_NB_API_URL") {
            self.nb_api_url = url;
        }
        if let Ok(url) = std::env::var("TRISENT_HF_API_URL") {
            self.hf_api_url = url;
        }
        // Same variable name the original deployment used
        if let Ok(token) = std::env::var("HF_TOKEN") {
            if !token.is_empty() {
                self.hf_token = Some(token);
            }
        }
    }
}

/// Per-user config file path: `<config_dir>/trisent/config.toml`
fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("trisent").join("config.toml"))
}
