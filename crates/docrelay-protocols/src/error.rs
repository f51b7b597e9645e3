//! Protocol-level errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("Invalid staged record: {0}")]
    InvalidRecord(String),

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
