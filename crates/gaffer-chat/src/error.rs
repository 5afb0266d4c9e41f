//! Error types for the chat engine.

use gaffer_core::error::GafferError;

/// Errors from the chat engine.
///
/// Only `EmptyMessage` and `MessageTooLong` ever reach the caller; they
/// indicate caller misuse. Everything else is recovered inside the
/// orchestrator and degraded to a textual reply.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("unknown feature: {0}")]
    UnknownFeature(String),
    #[error("feature dispatch failed: {0}")]
    DispatchError(String),
    #[error("model error: {0}")]
    ModelError(String),
}

impl From<GafferError> for ChatError {
    fn from(err: GafferError) -> Self {
        ChatError::DispatchError(err.to_string())
    }
}
