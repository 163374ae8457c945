//! Error types for the collegebot library.
//!
//! All fallible operations return [`BotError`]. Load-time problems with the
//! intent catalog or configuration surface as [`BotError::Configuration`] and
//! are meant to halt startup. Request-time comprehension failures (low
//! confidence, unknown tags) are not errors at all; the engine turns them
//! into fallback replies.
//!
//! # Examples
//!
//! ```
//! use collegebot::error::{BotError, Result};
//!
//! fn check_threshold(value: f64) -> Result<()> {
//!     if !(0.0..=1.0).contains(&value) {
//!         return Err(BotError::configuration("threshold out of range"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_threshold(1.5).is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for collegebot operations.
#[derive(Error, Debug)]
pub enum BotError {
    /// I/O errors (catalog, config and model files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed or incomplete catalog or configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Classifier errors (untrained model, incompatible artifact)
    #[error("Model error: {0}")]
    Model(String),

    /// Model artifact encode/decode errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for operations that may fail with BotError.
pub type Result<T> = std::result::Result<T, BotError>;

impl BotError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        BotError::Configuration(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        BotError::Model(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        BotError::Serialization(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        BotError::InvalidArgument(msg.into())
    }

    /// Whether this error came from catalog or configuration validation.
    pub fn is_configuration(&self) -> bool {
        matches!(self, BotError::Configuration(_))
    }
}

impl From<bincode::Error> for BotError {
    fn from(err: bincode::Error) -> Self {
        BotError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = BotError::configuration("duplicate tag 'greeting'");
        assert_eq!(
            error.to_string(),
            "Configuration error: duplicate tag 'greeting'"
        );
        assert!(error.is_configuration());

        let error = BotError::model("no classes");
        assert_eq!(error.to_string(), "Model error: no classes");
        assert!(!error.is_configuration());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let bot_error = BotError::from(io_error);

        match bot_error {
            BotError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
