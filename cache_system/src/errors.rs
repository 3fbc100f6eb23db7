//! Error types for Valkey client operations
//!
//! This module defines the errors a [`ValkeyClient`](crate::ValkeyClient)
//! reports, and how they map onto store errors.

use cache_store::StoreError;
use std::time::Duration;
use thiserror::Error;

/// Valkey client errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// The key does not exist on the server
    #[error("valkey nil message")]
    Nil,

    #[error("Valkey connection error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Valkey connection timed out after {0:?}")]
    Timeout(Duration),

    /// Failure reported verbatim by a client implementation
    #[error("{0}")]
    Command(String),
}

impl ClientError {
    pub fn command(message: impl Into<String>) -> Self {
        Self::Command(message.into())
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }
}

impl From<ClientError> for StoreError {
    fn from(err: ClientError) -> Self {
        StoreError::backend(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_message_is_verbatim() {
        let err: StoreError = ClientError::command("flush error").into();
        assert_eq!(err.to_string(), "flush error");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_nil_is_detected() {
        assert!(ClientError::Nil.is_nil());
        assert!(!ClientError::command("boom").is_nil());
    }
}
