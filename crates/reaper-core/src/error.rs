//! Error types for the Reaper access decision point

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReaperError>;

#[derive(Error, Debug)]
pub enum ReaperError {
    #[error("bad request: {reason}")]
    BadRequest { reason: String },

    #[error("transport error talking to policy source: {reason}")]
    TransportError { reason: String },

    #[error("no policies loaded for service '{service}'")]
    EmptySnapshot { service: String },

    #[error("access denied: {reason}")]
    Denied { reason: String },

    #[error("failed to emit audit record: {reason}")]
    AuditEmitFailure { reason: String },

    #[error("invalid policy definition: {reason}")]
    InvalidPolicy { reason: String },

    #[error("serialization error: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },

    #[error("internal error: {reason}")]
    Internal { reason: String },
}
