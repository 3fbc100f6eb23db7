//! Error types for the valkey-store crate
//!
//! This module contains all error types that can be returned while setting up
//! and checking a [`ValkeyCache`](crate::ValkeyCache).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValkeyCacheError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Valkey client error: {0}")]
    Client(#[from] cache_system::ClientError),

    #[error("Health check failed: unexpected reply {0:?}")]
    UnexpectedPing(String),
}
