//! Error types for ratewatch

use thiserror::Error;

/// Main error type for ratewatch
#[derive(Error, Debug)]
pub enum RateWatchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Bad response from rate service: {0}")]
    BadResponse(String),

    #[error("Rate not found for currency: {0}")]
    RateNotFound(String),

    #[error("Division by zero in statistics: {0}")]
    DivisionByZero(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Result type alias for ratewatch operations
pub type Result<T> = std::result::Result<T, RateWatchError>;
