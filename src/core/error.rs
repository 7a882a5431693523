//! Error types for the treelet crate

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid run parameters: {0}")]
    Params(String),

    #[error("Size mismatch for {buffer}: expected {expected} entries, got {actual}")]
    SizeMismatch {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },
}
