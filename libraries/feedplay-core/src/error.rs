/// Core error types for Feedplay
use thiserror::Error;

/// Result type alias using `AutoplayError`
pub type Result<T> = std::result::Result<T, AutoplayError>;

/// Core error type for Feedplay
///
/// Only configuration mistakes surface as errors. Runtime races (a callback
/// for an item that is no longer attached or current) are treated as no-ops
/// by the engine and never reach this type.
#[derive(Error, Debug)]
pub enum AutoplayError {
    /// Strategy name did not match any known policy
    #[error("Unknown playback strategy: {0}")]
    UnknownStrategy(String),

    /// Configuration value is out of range or inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration source could not be read or deserialized
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl AutoplayError {
    /// Create an unknown strategy error
    pub fn unknown_strategy(name: impl Into<String>) -> Self {
        Self::UnknownStrategy(name.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a configuration loading error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Error reported by the media primitive behind a `Playable`
///
/// Mirrors the `(what, extra)` pair most platform players report, plus a
/// free-form message for logging.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Media error {what}/{extra}: {message}")]
pub struct MediaError {
    /// Primary error code
    pub what: i32,
    /// Implementation-specific detail code
    pub extra: i32,
    /// Human-readable description
    pub message: String,
}

impl MediaError {
    /// Create a new media error
    pub fn new(what: i32, extra: i32, message: impl Into<String>) -> Self {
        Self {
            what,
            extra,
            message: message.into(),
        }
    }
}
