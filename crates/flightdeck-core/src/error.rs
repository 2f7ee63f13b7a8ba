//! Error types for the engine.

use thiserror::Error;

/// Engine-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration file
    #[error("Config error at line {line}: {message}")]
    Config {
        /// 1-based line number of the offending entry.
        line: usize,
        /// What was wrong with it.
        message: String,
    },

    /// Named binding or resource not found
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
