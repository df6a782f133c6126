//! Feature Extraction Error Types

use thiserror::Error;

/// Errors raised by the speech front-end
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// Malformed feature parameters, detected at construction
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Malformed call arguments (batch size, buffer length)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An internal invariant was violated
    #[error("Internal error: {0}")]
    Internal(String),

    /// FFT backend could not allocate its plan or buffers
    #[error("FFT backend initialization failed: {0}")]
    BackendInit(String),

    /// Configuration source could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for FeatureError {
    fn from(err: config::ConfigError) -> Self {
        FeatureError::Config(err.to_string())
    }
}
