//! Convenience re-exports for common cache-system usage

// Core cache system components
pub use crate::client::ValkeyClient;
pub use crate::errors::ClientError;
pub use crate::redis_client::RedisClient;
pub use crate::store::{ValkeyStore, VALKEY_TYPE};

// Re-export centralized config
pub use config::{StoreConfig, ValkeyConfig};

// Storage contract
pub use cache_store::prelude::*;

// Common external dependencies
pub use redis;
pub use tokio;
