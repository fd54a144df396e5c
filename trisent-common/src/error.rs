//! Common error types for Trisent

use thiserror::Error;

/// Common result type for Trisent operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the Trisent crates
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
