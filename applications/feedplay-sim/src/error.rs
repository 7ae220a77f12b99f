/// Simulator error types
use feedplay_core::AutoplayError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid scenario: {0}")]
    Scenario(String),

    #[error("Invariant violated: {0}")]
    Invariant(String),

    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("Autoplay error: {0}")]
    Autoplay(#[from] AutoplayError),

    #[error("Scenario parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
